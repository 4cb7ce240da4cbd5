//! Schema model types and their builders.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{StratumError, StratumResult};

use super::validate;

/// Type constraint attached to a [`Field`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum SchemaType {
    /// A JSON string.
    String,
    /// A whole number that fits `i64` or `u64`.
    Integer,
    /// Any JSON number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Any value, passed through unchecked.
    Any,
    /// One of a fixed set of values.
    Enum(Vec<Value>),
    /// A sequence whose items all satisfy the inner type.
    Array(Box<SchemaType>),
    /// A mapping described by a nested [`Schema`].
    Object(Schema),
}

impl SchemaType {
    /// Returns `true` when this type describes a mapping.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Any => f.write_str("any value"),
            Self::Enum(values) => {
                f.write_str("one of [")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Array(items) => write!(f, "array of {items}"),
            Self::Object(_) => f.write_str("object"),
        }
    }
}

impl From<Schema> for SchemaType {
    fn from(schema: Schema) -> Self {
        Self::Object(schema)
    }
}

/// Policy for keys present in a mapping but not declared by its [`Schema`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnknownFields {
    /// Drop undeclared keys from the validated output.
    #[default]
    Strip,
    /// Report undeclared keys as validation failures.
    Deny,
    /// Keep undeclared keys unchanged.
    Allow,
}

/// A single declared field of a [`Schema`].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    ty: SchemaType,
    required: bool,
    nullable: bool,
    default: Option<Value>,
}

impl Field {
    /// A required, non-nullable field of type `ty` without a default.
    #[must_use]
    pub const fn new(ty: SchemaType) -> Self {
        Self {
            ty,
            required: true,
            nullable: false,
            default: None,
        }
    }

    /// A required string field.
    #[must_use]
    pub const fn string() -> Self {
        Self::new(SchemaType::String)
    }

    /// A required integer field.
    #[must_use]
    pub const fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    /// A required numeric field.
    #[must_use]
    pub const fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    /// A required boolean field.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// A required field accepting any value.
    #[must_use]
    pub const fn any() -> Self {
        Self::new(SchemaType::Any)
    }

    /// A required field restricted to `values`.
    #[must_use]
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(SchemaType::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// A required array field whose items satisfy `items`.
    #[must_use]
    pub fn array(items: SchemaType) -> Self {
        Self::new(SchemaType::Array(Box::new(items)))
    }

    /// A required nested mapping.
    #[must_use]
    pub const fn object(schema: Schema) -> Self {
        Self::new(SchemaType::Object(schema))
    }

    /// Allow the field to be absent or `null`.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Accept an explicit `null` while keeping the field required.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Fill the field with `value` when it is absent.
    ///
    /// Defaults apply to absent keys only. A key explicitly set to `null`
    /// is present and is judged by [`Field::nullable`] and
    /// [`Field::optional`].
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The declared type.
    #[must_use]
    pub const fn ty(&self) -> &SchemaType {
        &self.ty
    }

    /// Whether the field must be present after defaults are applied.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Whether an explicit `null` satisfies the field.
    #[must_use]
    pub const fn accepts_null(&self) -> bool {
        self.nullable || !self.required
    }

    /// The default applied when the field is absent.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Ordered field declarations for a mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, Field)>,
    unknown_fields: UnknownFields,
}

impl Schema {
    /// An empty schema that strips unknown keys.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            unknown_fields: UnknownFields::Strip,
        }
    }

    /// Declare `name`, replacing any earlier declaration with that name.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        let declared: String = name.into();
        if let Some(slot) = self
            .fields
            .iter_mut()
            .find(|(existing, _)| *existing == declared)
        {
            slot.1 = field;
        } else {
            self.fields.push((declared, field));
        }
        self
    }

    /// Set the policy for undeclared keys.
    #[must_use]
    pub const fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// The policy for undeclared keys.
    #[must_use]
    pub const fn unknown_field_policy(&self) -> UnknownFields {
        self.unknown_fields
    }

    /// Iterate over declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Look up a declared field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find_map(|(existing, field)| (existing == name).then_some(field))
    }

    /// Validate `value`, returning it with defaults applied and undeclared
    /// keys handled according to the unknown-field policy.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Validation`] for a single failure, or
    /// [`StratumError::Aggregate`] when several fields fail.
    pub fn validate(&self, value: &Value) -> StratumResult<Value> {
        validate::validate_object(self, value)
            .map_err(|issues| Arc::new(StratumError::aggregate(issues)))
    }

    /// Check that every declared default satisfies its own field.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InvalidSchema`] naming the first offending
    /// default.
    pub fn check_defaults(&self) -> StratumResult<()> {
        validate::check_defaults(self, "")
    }
}
