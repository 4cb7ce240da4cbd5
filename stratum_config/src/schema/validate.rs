//! Validation of fragments against a [`Schema`].
//!
//! Validation walks the schema and the value together, building a new value
//! that carries defaults for absent fields. Every failure is collected so a
//! single call reports all offending fields.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{StratumError, StratumResult};

use super::{Field, Schema, SchemaType, UnknownFields};

const ROOT: &str = "(root)";

/// Names the JSON shape of `value` for diagnostics.
///
/// # Examples
///
/// ```rust
/// use stratum_config::schema::describe_value;
/// use serde_json::json;
///
/// assert_eq!(describe_value(&json!(3)), "integer");
/// assert_eq!(describe_value(&json!(3.5)), "number");
/// assert_eq!(describe_value(&json!(null)), "null");
/// ```
#[must_use]
pub fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn display_key(path: &str) -> &str {
    if path.is_empty() { ROOT } else { path }
}

fn child_key(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{path}.{name}")
    }
}

fn index_key(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

/// Validate `value` against `schema`, returning the checked value or every
/// failure encountered.
pub(super) fn validate_object(schema: &Schema, value: &Value) -> Result<Value, Vec<StratumError>> {
    let mut issues = Vec::new();
    let checked = check_object(schema, value, "", &mut issues);
    if issues.is_empty() {
        Ok(checked)
    } else {
        Err(issues)
    }
}

fn mismatch(path: &str, expected: &SchemaType, value: &Value, issues: &mut Vec<StratumError>) -> Value {
    issues.push(StratumError::validation(
        display_key(path),
        expected.to_string(),
        describe_value(value),
    ));
    Value::Null
}

fn check_object(schema: &Schema, value: &Value, path: &str, issues: &mut Vec<StratumError>) -> Value {
    let Some(map) = value.as_object() else {
        issues.push(StratumError::validation(
            display_key(path),
            "object",
            describe_value(value),
        ));
        return Value::Null;
    };

    let mut out = Map::new();
    for (name, field) in schema.fields() {
        let key = child_key(path, name);
        match map.get(name) {
            Some(present) => {
                let checked = check_field(field, present, &key, issues);
                out.insert(name.to_owned(), checked);
            }
            None => {
                if let Some(default) = field.default_value() {
                    let checked = check_type(field.ty(), default, &key, issues);
                    out.insert(name.to_owned(), checked);
                } else if field.is_required() {
                    issues.push(StratumError::validation(
                        key,
                        field.ty().to_string(),
                        "missing",
                    ));
                }
            }
        }
    }

    for (name, extra) in map.iter().filter(|(name, _)| schema.get(name).is_none()) {
        match schema.unknown_field_policy() {
            UnknownFields::Strip => {}
            UnknownFields::Allow => {
                out.insert(name.clone(), extra.clone());
            }
            UnknownFields::Deny => issues.push(StratumError::validation(
                child_key(path, name),
                "absent (unknown field)",
                describe_value(extra),
            )),
        }
    }

    Value::Object(out)
}

fn check_field(field: &Field, value: &Value, path: &str, issues: &mut Vec<StratumError>) -> Value {
    if value.is_null() {
        if !field.accepts_null() {
            issues.push(StratumError::validation(path, field.ty().to_string(), "null"));
        }
        return Value::Null;
    }
    check_type(field.ty(), value, path, issues)
}

fn check_type(ty: &SchemaType, value: &Value, path: &str, issues: &mut Vec<StratumError>) -> Value {
    let accepted = match ty {
        SchemaType::String => value.is_string(),
        SchemaType::Integer => value.is_i64() || value.is_u64(),
        SchemaType::Number => value.is_number(),
        SchemaType::Boolean => value.is_boolean(),
        SchemaType::Any => true,
        SchemaType::Enum(values) => values.contains(value),
        SchemaType::Array(items) => {
            let Some(elements) = value.as_array() else {
                return mismatch(path, ty, value, issues);
            };
            return Value::Array(
                elements
                    .iter()
                    .enumerate()
                    .map(|(i, item)| check_type(items, item, &index_key(path, i), issues))
                    .collect(),
            );
        }
        SchemaType::Object(schema) => return check_object(schema, value, path, issues),
    };

    if accepted {
        value.clone()
    } else {
        mismatch(path, ty, value, issues)
    }
}

/// Confirm that every default declared under `schema` satisfies its field.
pub(super) fn check_defaults(schema: &Schema, path: &str) -> StratumResult<()> {
    for (name, field) in schema.fields() {
        let key = child_key(path, name);
        if let Some(default) = field.default_value() {
            let mut issues = Vec::new();
            check_field(field, default, &key, &mut issues);
            if let Some(issue) = issues.into_iter().next() {
                return Err(Arc::new(StratumError::invalid_schema(format!(
                    "default for '{key}' does not satisfy its field: {issue}"
                ))));
            }
        }
        check_nested_defaults(field.ty(), &key)?;
    }
    Ok(())
}

fn check_nested_defaults(ty: &SchemaType, path: &str) -> StratumResult<()> {
    match ty {
        SchemaType::Object(schema) => check_defaults(schema, path),
        SchemaType::Array(items) => check_nested_defaults(items, &format!("{path}[]")),
        _ => Ok(()),
    }
}
