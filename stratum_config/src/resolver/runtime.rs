//! Runtime steps applied after every path override has been merged.
//!
//! Runtime steps compute derived values from the configuration resolved so
//! far. They run in registration order and each one sees the output of the
//! steps before it.

use serde_json::Value;

use crate::StratumResult;

/// A post-merge computation producing a fragment to merge into the
/// accumulator.
///
/// Closures registered through
/// [`ConfigResolver::add_runtime`](crate::ConfigResolver::add_runtime) cover
/// the common case. Implement this trait directly when the step can fail.
///
/// # Examples
///
/// ```rust
/// use stratum_config::{RuntimeContext, RuntimeStep, StratumError, StratumResult};
/// use serde_json::{Value, json};
///
/// struct RegionFromKey;
///
/// impl RuntimeStep for RegionFromKey {
///     fn compute(&self, ctx: &RuntimeContext<'_>, _resolved: &Value) -> StratumResult<Value> {
///         let region = ctx.segments().nth(1).ok_or_else(|| {
///             StratumError::lookup(ctx.path_key(), "path key has no region segment")
///         })?;
///         Ok(json!({"region": region}))
///     }
/// }
/// ```
pub trait RuntimeStep: Send + Sync {
    /// Produce a fragment from the resolved configuration.
    ///
    /// # Errors
    ///
    /// Any error is propagated unchanged to the caller of `get`.
    fn compute(&self, ctx: &RuntimeContext<'_>, resolved: &Value) -> StratumResult<Value>;
}

/// Adapter turning an infallible closure into a [`RuntimeStep`].
pub(crate) struct FnStep<F>(pub(crate) F);

impl<F> RuntimeStep for FnStep<F>
where
    F: Fn(&RuntimeContext<'_>, &Value) -> Value + Send + Sync,
{
    fn compute(&self, ctx: &RuntimeContext<'_>, resolved: &Value) -> StratumResult<Value> {
        Ok((self.0)(ctx, resolved))
    }
}

/// Context handed to each runtime step.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeContext<'a> {
    path_key: &'a str,
    applied_paths: &'a [String],
    step: usize,
}

impl<'a> RuntimeContext<'a> {
    /// Creates a context for the step at `step` resolving `path_key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stratum_config::RuntimeContext;
    ///
    /// let applied = vec![String::from("dev")];
    /// let ctx = RuntimeContext::new("dev/staging", &applied, 0);
    /// assert_eq!(ctx.path_key(), "dev/staging");
    /// assert_eq!(ctx.applied_paths(), ["dev"]);
    /// ```
    #[must_use]
    pub const fn new(path_key: &'a str, applied_paths: &'a [String], step: usize) -> Self {
        Self {
            path_key,
            applied_paths,
            step,
        }
    }

    /// The path key being resolved.
    #[must_use]
    pub const fn path_key(&self) -> &'a str {
        self.path_key
    }

    /// Path keys whose overrides contributed, least specific first.
    #[must_use]
    pub const fn applied_paths(&self) -> &'a [String] {
        self.applied_paths
    }

    /// Registration index of the running step.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Iterate over the `/`-separated segments of the path key.
    pub fn segments(&self) -> impl Iterator<Item = &'a str> {
        self.path_key.split(crate::path::PATH_SEPARATOR)
    }
}
