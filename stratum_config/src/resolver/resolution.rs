//! The unvalidated outcome of folding every layer for a path key.

use serde_json::Value;

use crate::layer::{FragmentLayer, LayerSource};

/// Accumulated value and contributing layers for one path key.
///
/// Produced by [`ConfigResolver::resolve_layers`](crate::ConfigResolver::resolve_layers)
/// before schema validation, so it shows exactly what the fragments said,
/// including explicit `null` erasures.
#[derive(Clone, Debug)]
pub struct Resolution<'a> {
    path_key: String,
    value: Value,
    layers: Vec<FragmentLayer<'a>>,
}

impl<'a> Resolution<'a> {
    pub(crate) const fn new(path_key: String, value: Value, layers: Vec<FragmentLayer<'a>>) -> Self {
        Self {
            path_key,
            value,
            layers,
        }
    }

    /// The path key that was resolved.
    #[must_use]
    pub const fn path_key(&self) -> &str {
        self.path_key.as_str()
    }

    /// The merged, unvalidated value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Layers in the order they were applied.
    #[must_use]
    pub const fn layers(&self) -> &[FragmentLayer<'a>] {
        self.layers.as_slice()
    }

    /// Consume the resolution, returning the merged value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the last layer that set the value at the JSON `pointer`.
    ///
    /// Returns `None` when the merged value has nothing at `pointer`, for
    /// example after a later layer erased it with `null` or replaced a
    /// parent mapping with a scalar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stratum_config::{ConfigResolver, LayerSource};
    /// use stratum_config::schema::{Field, Schema};
    /// use serde_json::json;
    ///
    /// let mut resolver: ConfigResolver =
    ///     ConfigResolver::new(Schema::new().field("replicas", Field::integer()))?;
    /// resolver
    ///     .set_default(json!({"replicas": 1}))
    ///     .set("dev/staging", json!({"replicas": 3}));
    ///
    /// let resolution = resolver.resolve_layers("dev/staging")?;
    /// assert_eq!(
    ///     resolution.source_of("/replicas"),
    ///     Some(&LayerSource::Path("dev/staging".into()))
    /// );
    /// # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
    /// ```
    #[must_use]
    pub fn source_of(&self, pointer: &str) -> Option<&LayerSource> {
        self.value.pointer(pointer)?;
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.value().pointer(pointer).is_some())
            .map(FragmentLayer::source)
    }
}
