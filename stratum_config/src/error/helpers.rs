//! Helpers for classifying errors.

use super::StratumError;

/// Returns `true` when `err` (or any error it aggregates) is a validation
/// failure.
///
/// Callers that assemble configuration from user-supplied fragments use this
/// to tell "fix your configuration" apart from lookup or I/O failures.
#[must_use]
pub fn is_validation_failure(err: &StratumError) -> bool {
    match err {
        StratumError::Validation { .. } => true,
        StratumError::Aggregate(agg) => agg.iter().any(is_validation_failure),
        _ => false,
    }
}
