//! Contract for turning a context handle into a path key.

use crate::StratumResult;

/// Resolves an opaque context handle to its effective path key.
///
/// The resolver depends on this contract only; how a context stores or
/// inherits its path key is up to the implementation. Errors are propagated
/// unchanged by [`ConfigResolver::get_in`](crate::ConfigResolver::get_in).
pub trait PathKeyLookup<C: ?Sized> {
    /// Returns the path key associated with `context`.
    ///
    /// # Errors
    ///
    /// Returns an error when no path key can be determined for `context`.
    fn resolve(&self, context: &C) -> StratumResult<String>;
}

/// Lookup that treats the context itself as the path key.
///
/// # Examples
///
/// ```rust
/// use stratum_config::{LiteralPathKey, PathKeyLookup};
///
/// assert_eq!(LiteralPathKey.resolve("dev/staging")?, "dev/staging");
/// # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LiteralPathKey;

impl PathKeyLookup<str> for LiteralPathKey {
    fn resolve(&self, context: &str) -> StratumResult<String> {
        Ok(context.to_owned())
    }
}
