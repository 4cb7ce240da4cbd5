//! JSON conversion helpers used once a value has been validated.

use serde_json::Value;

use crate::{StratumResult, result_ext::StratumResultExt};

/// Deserialise a JSON [`Value`] into `T`.
///
/// # Errors
///
/// Returns [`crate::StratumError::Deserialize`] when deserialisation fails.
///
/// # Examples
///
/// ```rust
/// use stratum_config::from_value;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Service { replicas: u16 }
///
/// let service: Service = from_value(json!({"replicas": 3}))?;
/// assert_eq!(service.replicas, 3);
/// # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
/// ```
pub fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> StratumResult<T> {
    serde_json::from_value(value).into_stratum()
}
