//! Shared fixtures for integration tests.
//!
//! Every integration suite resolves the same service schema so scenarios can
//! be compared across files.

use anyhow::anyhow;
use serde::Deserialize;
use serde_json::json;
use stratum_config::ConfigResolver;
use stratum_config::schema::{Field, Schema, SchemaType};

/// Typed view of the service configuration used across suites.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    pub name: String,
    pub replicas: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Schema requiring `name` and defaulting `replicas` to one.
pub fn service_schema() -> Schema {
    Schema::new()
        .field("name", Field::string())
        .field("replicas", Field::integer().with_default(1))
        .field("tags", Field::array(SchemaType::String).with_default(json!([])))
}

/// Build a typed resolver around [`service_schema`].
pub fn service_resolver() -> anyhow::Result<ConfigResolver<Service>> {
    ConfigResolver::new(service_schema()).map_err(|err| anyhow!(err.to_string()))
}

/// Convert any displayable error into `anyhow::Error`.
pub fn to_anyhow<T, E: std::fmt::Display>(result: Result<T, E>) -> anyhow::Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}
