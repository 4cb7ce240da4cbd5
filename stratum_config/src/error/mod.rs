//! Error types produced by the configuration resolver.

mod aggregate;
mod constructors;
mod conversions;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub use helpers::is_validation_failure;
pub use types::StratumError;
