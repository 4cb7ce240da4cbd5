//! Container for every issue reported by one resolution or schema check.

use std::{error::Error, fmt, sync::Arc};

use super::StratumError;

/// The issues collected while validating a resolved configuration.
///
/// Validation does not stop at the first bad field, so a single `get` may
/// report a missing `name` and a mistyped `replicas` together. Issues keep
/// the order in which the schema visited them.
///
/// # Examples
///
/// ```
/// use stratum_config::StratumError;
///
/// let err = StratumError::aggregate(vec![
///     StratumError::validation("name", "string", "missing"),
///     StratumError::validation("replicas", "integer", "string"),
/// ]);
/// let StratumError::Aggregate(issues) = err else {
///     panic!("two issues are reported together");
/// };
/// assert_eq!(issues.validation_keys().collect::<Vec<_>>(), ["name", "replicas"]);
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<StratumError>>);

impl AggregatedErrors {
    /// Wrap `issues` in schema visiting order.
    #[must_use]
    pub const fn new(issues: Vec<Arc<StratumError>>) -> Self {
        Self(issues)
    }

    /// Iterate over the issues.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &StratumError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Dotted keys of the validation failures, skipping other issues.
    pub fn validation_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|issue| match issue {
            StratumError::Validation { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    /// Number of issues.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was reported.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(super) fn shared(&self) -> impl Iterator<Item = &Arc<StratumError>> {
        self.0.iter()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.0.iter();
        if let Some(first) = lines.next() {
            write!(f, "  - {first}")?;
        }
        for issue in lines {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a StratumError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<StratumError>>,
        fn(&'a Arc<StratumError>) -> &'a StratumError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<StratumError>;
    type IntoIter = std::vec::IntoIter<Arc<StratumError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
