//! Declarative schema describing the shape of resolved configuration.
//!
//! A [`Schema`] lists the fields of a mapping. Each [`Field`] declares a
//! [`SchemaType`], whether it is required, whether `null` is acceptable and an
//! optional default that fills the field when it is absent. Schemas can be
//! built in code or parsed from a small subset of JSON Schema.
//!
//! # Example
//!
//! ```rust
//! use stratum_config::schema::{Field, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("name", Field::string())
//!     .field("replicas", Field::integer().with_default(1));
//!
//! let checked = schema.validate(&json!({"name": "svc"}))?;
//! assert_eq!(checked, json!({"name": "svc", "replicas": 1}));
//! # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
//! ```

mod json;
mod model;
mod validate;

pub use model::{Field, Schema, SchemaType, UnknownFields};
pub use validate::describe_value;
