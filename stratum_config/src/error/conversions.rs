//! Trait-based conversions between external error types and `StratumError`.

use super::StratumError;

impl From<serde_json::Error> for StratumError {
    fn from(e: serde_json::Error) -> Self {
        Self::Deserialize(Box::new(e))
    }
}
