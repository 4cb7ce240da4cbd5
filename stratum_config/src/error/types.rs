//! Primary error enum for configuration resolution flows.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while building or resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StratumError {
    /// The schema handed to a resolver does not describe a mapping, or a
    /// schema document could not be interpreted.
    #[error("Invalid schema: {message}")]
    InvalidSchema {
        /// Human-readable explanation of the schema defect.
        message: String,
    },

    /// A resolved value failed schema validation.
    #[error("Validation failed for '{key}': expected {expected}, found {found}")]
    Validation {
        /// Dotted path of the offending field, for example `database.port`.
        key: String,
        /// Shape the schema declares for the field.
        expected: String,
        /// Shape actually observed, or `missing`.
        found: String,
    },

    /// A context handle could not be turned into a path key.
    #[error("Path key lookup failed for {context}: {message}")]
    Lookup {
        /// Description of the context handle that failed to resolve.
        context: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// Error originating from a fragment file.
    #[error("Fragment file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The validated value could not be deserialised into the output type.
    #[error("Failed to deserialise resolved configuration: {0}")]
    Deserialize(#[from] Box<serde_json::Error>),

    /// Multiple errors occurred during a single call.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
