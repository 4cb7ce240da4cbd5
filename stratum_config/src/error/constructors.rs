//! Constructors for `StratumError`, including the issue collector used by
//! schema validation.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use super::{AggregatedErrors, StratumError};

impl StratumError {
    /// Collapse the issues reported by one call into a single error.
    ///
    /// Nested [`Self::Aggregate`] values are flattened so every issue sits at
    /// the same level. The result is:
    /// * `None` when nothing was reported;
    /// * the issue itself when exactly one uniquely owned issue remains;
    /// * [`Self::Aggregate`] otherwise, including a lone issue that is still
    ///   shared elsewhere.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut issues: Vec<Arc<Self>> = Vec::new();
        for error in errors {
            let issue: Arc<Self> = error.into();
            match &*issue {
                Self::Aggregate(nested) => issues.extend(nested.shared().cloned()),
                _ => issues.push(issue),
            }
        }

        match <[Arc<Self>; 1]>::try_from(issues) {
            Ok([single]) => Some(Arc::try_unwrap(single).unwrap_or_else(|shared| {
                Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared])))
            })),
            Err(many) if many.is_empty() => None,
            Err(many) => Some(Self::Aggregate(Box::new(AggregatedErrors::new(many)))),
        }
    }

    /// Collapse a non-empty list of issues into a single error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Validation only calls this after
    /// recording an issue; use [`StratumError::try_aggregate`] elsewhere.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("no configuration issues were reported"),
            |err| err,
        )
    }

    /// Construct a validation error for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratum_config::StratumError;
    /// let e = StratumError::validation("name", "string", "missing");
    /// assert_eq!(
    ///     e.to_string(),
    ///     "Validation failed for 'name': expected string, found missing"
    /// );
    /// ```
    #[must_use]
    pub fn validation(
        key: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::Validation {
            key: key.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Construct a schema construction error.
    #[must_use]
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }

    /// Construct a path-key lookup error wrapped in an [`Arc`].
    ///
    /// Lookup implementations return `StratumResult`, so this helper hands
    /// back the shared form directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratum_config::StratumError;
    /// let e = StratumError::lookup("scope 'app/db'", "no path key is set");
    /// assert!(matches!(&*e, StratumError::Lookup { .. }));
    /// ```
    #[must_use]
    pub fn lookup(context: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Lookup {
            context: context.into(),
            message: message.into(),
        })
    }

    /// Construct a fragment file error for `path`.
    #[must_use]
    pub fn file(path: &Utf8Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
