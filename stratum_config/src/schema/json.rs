//! Parsing schemas from a subset of JSON Schema.
//!
//! Supported keywords: `type` (a single name or a list that may include
//! `"null"`), `properties`, `required`, `default`, `enum`, `items` and
//! `additionalProperties` (boolean only). An object without
//! `additionalProperties` strips undeclared keys, unless it declares no
//! properties at all, in which case it is treated as a free-form map.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{StratumError, StratumResult};

use super::{Field, Schema, SchemaType, UnknownFields};

fn invalid(pointer: &str, message: impl std::fmt::Display) -> Arc<StratumError> {
    let at = if pointer.is_empty() { "/" } else { pointer };
    Arc::new(StratumError::invalid_schema(format!("at '{at}': {message}")))
}

struct TypeDecl {
    name: Option<String>,
    nullable: bool,
}

fn read_type(doc: &Map<String, Value>, pointer: &str) -> StratumResult<TypeDecl> {
    match doc.get("type") {
        None => Ok(TypeDecl {
            name: None,
            nullable: false,
        }),
        Some(Value::String(name)) => Ok(TypeDecl {
            nullable: name == "null",
            name: (name != "null").then(|| name.clone()),
        }),
        Some(Value::Array(names)) => {
            let mut decl = TypeDecl {
                name: None,
                nullable: false,
            };
            for entry in names {
                let Some(name) = entry.as_str() else {
                    return Err(invalid(pointer, "'type' entries must be strings"));
                };
                if name == "null" {
                    decl.nullable = true;
                } else if decl.name.is_some() {
                    return Err(invalid(pointer, "only one non-null type may be listed"));
                } else {
                    decl.name = Some(name.to_owned());
                }
            }
            Ok(decl)
        }
        Some(other) => Err(invalid(
            pointer,
            format_args!("'type' must be a string or list, found {other}"),
        )),
    }
}

fn parse_type(doc: &Map<String, Value>, name: Option<&str>, pointer: &str) -> StratumResult<SchemaType> {
    if let Some(declared) = doc.get("enum") {
        let Some(values) = declared.as_array() else {
            return Err(invalid(pointer, "'enum' must be a list"));
        };
        return Ok(SchemaType::Enum(values.clone()));
    }

    match name {
        None => Ok(SchemaType::Any),
        Some("string") => Ok(SchemaType::String),
        Some("integer") => Ok(SchemaType::Integer),
        Some("number") => Ok(SchemaType::Number),
        Some("boolean") => Ok(SchemaType::Boolean),
        Some("array") => {
            let items = match doc.get("items") {
                None => SchemaType::Any,
                Some(items) => {
                    let item_pointer = format!("{pointer}/items");
                    let (ty, _) = parse_node(items, &item_pointer)?;
                    ty
                }
            };
            Ok(SchemaType::Array(Box::new(items)))
        }
        Some("object") => parse_object(doc, pointer).map(SchemaType::Object),
        Some(other) => Err(invalid(pointer, format_args!("unsupported type '{other}'"))),
    }
}

/// Parses one schema node into its type and `null` acceptance.
fn parse_node(node: &Value, pointer: &str) -> StratumResult<(SchemaType, bool)> {
    let Some(doc) = node.as_object() else {
        return Err(invalid(pointer, "schema nodes must be objects"));
    };
    let decl = read_type(doc, pointer)?;
    let ty = parse_type(doc, decl.name.as_deref(), pointer)?;
    Ok((ty, decl.nullable))
}

fn required_names(doc: &Map<String, Value>, pointer: &str) -> StratumResult<Vec<String>> {
    match doc.get("required") {
        None => Ok(Vec::new()),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| {
                name.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| invalid(pointer, "'required' entries must be strings"))
            })
            .collect(),
        Some(_) => Err(invalid(pointer, "'required' must be a list")),
    }
}

fn parse_object(doc: &Map<String, Value>, pointer: &str) -> StratumResult<Schema> {
    let properties = match doc.get("properties") {
        None => Map::new(),
        Some(Value::Object(properties)) => properties.clone(),
        Some(_) => return Err(invalid(pointer, "'properties' must be an object")),
    };
    let required = required_names(doc, pointer)?;
    if let Some(unknown) = required.iter().find(|name| !properties.contains_key(*name)) {
        return Err(invalid(
            pointer,
            format_args!("required field '{unknown}' is not declared in 'properties'"),
        ));
    }

    let policy = match doc.get("additionalProperties") {
        None if properties.is_empty() => UnknownFields::Allow,
        None => UnknownFields::Strip,
        Some(Value::Bool(true)) => UnknownFields::Allow,
        Some(Value::Bool(false)) => UnknownFields::Deny,
        Some(_) => {
            return Err(invalid(
                pointer,
                "'additionalProperties' must be a boolean",
            ));
        }
    };

    let mut schema = Schema::new().unknown_fields(policy);
    for (name, node) in &properties {
        let field_pointer = format!("{pointer}/properties/{name}");
        let (ty, nullable) = parse_node(node, &field_pointer)?;
        let mut field = Field::new(ty);
        if !required.contains(name) {
            field = field.optional();
        }
        if nullable {
            field = field.nullable();
        }
        if let Some(default) = node.get("default") {
            field = field.with_default(default.clone());
        }
        schema = schema.field(name.clone(), field);
    }
    Ok(schema)
}

impl SchemaType {
    /// Parse a JSON Schema document into a [`SchemaType`].
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InvalidSchema`] when the document uses an
    /// unsupported keyword value or is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stratum_config::schema::SchemaType;
    /// use serde_json::json;
    ///
    /// let ty = SchemaType::from_json_schema(&json!({"type": "string"}))?;
    /// assert_eq!(ty, SchemaType::String);
    /// # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
    /// ```
    pub fn from_json_schema(doc: &Value) -> StratumResult<Self> {
        parse_node(doc, "").map(|(ty, _)| ty)
    }
}

impl Schema {
    /// Parse a JSON Schema document describing an object.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InvalidSchema`] when the document is malformed
    /// or does not describe an object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stratum_config::schema::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_json_schema(&json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "name": {"type": "string"},
    ///         "replicas": {"type": "integer", "default": 1}
    ///     },
    ///     "required": ["name"]
    /// }))?;
    /// assert!(schema.get("name").is_some_and(|f| f.is_required()));
    /// # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
    /// ```
    pub fn from_json_schema(doc: &Value) -> StratumResult<Self> {
        match SchemaType::from_json_schema(doc)? {
            SchemaType::Object(schema) => Ok(schema),
            other => Err(invalid("", format_args!("expected an object schema, found {other}"))),
        }
    }
}
