//! Deep merge of configuration fragments.
//!
//! Fragments are [`serde_json::Value`] trees. Mappings merge recursively;
//! everything else (scalars, arrays, explicit `null`) replaces the value
//! underneath it wholesale. Key order follows insertion: keys already present
//! keep their position and keys introduced by the overlay are appended.

use serde_json::{Map, Value};

/// Merge `overlay` over `base`, returning a new value.
///
/// Neither input is modified.
///
/// # Examples
///
/// ```rust
/// use stratum_config::deep_merge;
/// use serde_json::json;
///
/// let base = json!({"name": "svc", "tags": ["a", "b"], "limits": {"cpu": 1}});
/// let overlay = json!({"tags": ["c"], "limits": {"memory": 512}, "owner": null});
/// let merged = deep_merge(&base, &overlay);
///
/// assert_eq!(
///     merged,
///     json!({
///         "name": "svc",
///         "tags": ["c"],
///         "limits": {"cpu": 1, "memory": 512},
///         "owner": null
///     })
/// );
/// ```
#[must_use]
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    merge_value(&mut merged, overlay.clone());
    merged
}

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Behaviour:
/// - When merging an object into a non-object target, target is initialised
///   to `{}` first, so the object replaces the scalar.
/// - Objects are merged recursively (keys are added or overwritten, and
///   nested objects are overlaid).
/// - Arrays, scalars and `null` replace `target` wholesale.
///
/// # Examples
///
/// ```rust
/// use stratum_config::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"a": 1, "b": {"x": 1}});
/// merge_value(&mut acc, json!({"b": {"y": 2}, "c": 3}));
/// assert_eq!(acc, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
///
/// merge_value(&mut acc, json!({"b": null}));
/// assert_eq!(acc["b"], serde_json::Value::Null);
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(map) => merge_object(target, map),
        _ => *target = layer,
    }
}

fn merge_object(target: &mut Value, map: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    let Some(target_map) = target.as_object_mut() else {
        return;
    };

    for (key, value) in map {
        match target_map.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                target_map.insert(key, value);
            }
        }
    }
}
