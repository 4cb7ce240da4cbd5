//! The hierarchical configuration resolver.
//!
//! A [`ConfigResolver`] is configured during a build phase with a default
//! fragment, per-path overrides and runtime steps, then queried any number of
//! times. Resolution folds, in order:
//!
//! 1. the default fragment (or `{}`),
//! 2. the override registered for each ancestor of the path key, least
//!    specific first (ancestors without an override are skipped),
//! 3. the output of each runtime step, in registration order,
//!
//! and finally validates the result against the schema.

mod lookup;
mod resolution;
mod runtime;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use camino::Utf8Path;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::convert::from_value;
use crate::file::load_fragment;
use crate::layer::FragmentLayer;
use crate::merge::merge_value;
use crate::path::ancestors;
use crate::schema::{Schema, SchemaType};
use crate::{StratumError, StratumResult};

pub use lookup::{LiteralPathKey, PathKeyLookup};
pub use resolution::Resolution;
pub use runtime::{RuntimeContext, RuntimeStep};

use runtime::FnStep;

/// Resolves configuration for slash-delimited path keys.
///
/// `T` is the type produced by [`ConfigResolver::get`]; it defaults to
/// [`serde_json::Value`].
///
/// # Examples
///
/// ```rust
/// use stratum_config::ConfigResolver;
/// use stratum_config::schema::{Field, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .field("name", Field::string())
///     .field("replicas", Field::integer().with_default(1));
///
/// let mut resolver: ConfigResolver = ConfigResolver::new(schema)?;
/// resolver
///     .set_default(json!({}))
///     .set("dev", json!({"name": "svc"}))
///     .set("dev/staging", json!({"replicas": 3}));
///
/// assert_eq!(resolver.get("dev/staging")?, json!({"name": "svc", "replicas": 3}));
/// assert_eq!(resolver.get("dev/production")?, json!({"name": "svc", "replicas": 1}));
/// # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
/// ```
pub struct ConfigResolver<T = Value> {
    schema: Schema,
    defaults: Option<Value>,
    overrides: BTreeMap<String, Value>,
    runtime: Vec<Box<dyn RuntimeStep>>,
    output: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for ConfigResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("schema", &self.schema)
            .field("defaults", &self.defaults)
            .field("overrides", &self.overrides)
            .field("runtime_steps", &self.runtime.len())
            .finish()
    }
}

impl<T> ConfigResolver<T> {
    /// Create a resolver around `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InvalidSchema`] when `schema` does not describe
    /// a mapping or when one of its defaults violates its own field.
    pub fn new(schema: impl Into<SchemaType>) -> StratumResult<Self> {
        let fields = match schema.into() {
            SchemaType::Object(fields) => fields,
            other => {
                return Err(Arc::new(StratumError::invalid_schema(format!(
                    "the root schema must describe a mapping, found {other}"
                ))));
            }
        };
        fields.check_defaults()?;
        Ok(Self {
            schema: fields,
            defaults: None,
            overrides: BTreeMap::new(),
            runtime: Vec::new(),
            output: PhantomData,
        })
    }

    /// Create a resolver from a JSON Schema document.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InvalidSchema`] when the document is malformed
    /// or does not describe an object.
    pub fn from_json_schema(doc: &Value) -> StratumResult<Self> {
        Self::new(SchemaType::from_json_schema(doc)?)
    }

    /// Replace the default fragment. The previous default is discarded.
    pub fn set_default(&mut self, fragment: Value) -> &mut Self {
        self.defaults = Some(fragment);
        self
    }

    /// Register `fragment` for `path_key`, deep-merging it over any fragment
    /// already registered for that key.
    pub fn set(&mut self, path_key: impl Into<String>, fragment: Value) -> &mut Self {
        let key: String = path_key.into();
        match self.overrides.get_mut(&key) {
            Some(existing) => merge_value(existing, fragment),
            None => {
                self.overrides.insert(key, fragment);
            }
        }
        self
    }

    /// Load a fragment from a JSON or TOML file and register it for
    /// `path_key` with [`ConfigResolver::set`] semantics.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::File`] when the file cannot be read or parsed. The resolver is unchanged on error.
    pub fn set_from_file(
        &mut self,
        path_key: impl Into<String>,
        file: &Utf8Path,
    ) -> StratumResult<&mut Self> {
        let fragment = load_fragment(file)?;
        Ok(self.set(path_key, fragment))
    }

    /// Append a runtime step computed by `step`.
    ///
    /// The closure receives the [`RuntimeContext`] and the configuration
    /// resolved so far, and returns a fragment to merge.
    pub fn add_runtime<F>(&mut self, step: F) -> &mut Self
    where
        F: Fn(&RuntimeContext<'_>, &Value) -> Value + Send + Sync + 'static,
    {
        self.add_runtime_step(FnStep(step))
    }

    /// Append a [`RuntimeStep`] implementation.
    pub fn add_runtime_step<R>(&mut self, step: R) -> &mut Self
    where
        R: RuntimeStep + 'static,
    {
        self.runtime.push(Box::new(step));
        self
    }

    /// The schema every resolution is validated against.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The current default fragment.
    #[must_use]
    pub const fn default_fragment(&self) -> Option<&Value> {
        self.defaults.as_ref()
    }

    /// The accumulated override registered for exactly `path_key`.
    #[must_use]
    pub fn override_for(&self, path_key: &str) -> Option<&Value> {
        self.overrides.get(path_key)
    }

    /// Path keys with a registered override, in lexical order.
    pub fn path_keys(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    /// Number of registered runtime steps.
    #[must_use]
    pub const fn runtime_len(&self) -> usize {
        self.runtime.len()
    }

    /// Fold every layer for `path_key` without validating the result.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by a runtime step.
    pub fn resolve_layers(&self, path_key: &str) -> StratumResult<Resolution<'_>> {
        let mut layers = Vec::new();
        let mut value = match &self.defaults {
            Some(defaults) => {
                layers.push(FragmentLayer::defaults(Cow::Borrowed(defaults)));
                defaults.clone()
            }
            None => Value::Object(Map::new()),
        };

        let mut applied = Vec::new();
        for ancestor in ancestors(path_key) {
            let Some(fragment) = self.overrides.get(ancestor) else {
                tracing::trace!(path_key, ancestor, "no override registered for ancestor");
                continue;
            };
            merge_value(&mut value, fragment.clone());
            applied.push(ancestor.to_owned());
            layers.push(FragmentLayer::path(ancestor, Cow::Borrowed(fragment)));
        }

        for (index, step) in self.runtime.iter().enumerate() {
            let ctx = RuntimeContext::new(path_key, &applied, index);
            let fragment = step.compute(&ctx, &value)?;
            tracing::trace!(path_key, step = index, "applied runtime step");
            merge_value(&mut value, fragment.clone());
            layers.push(FragmentLayer::runtime(index, Cow::Owned(fragment)));
        }

        Ok(Resolution::new(path_key.to_owned(), value, layers))
    }

    /// Resolve and validate `path_key`, returning the checked JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Validation`] (or an aggregate of them) when the
    /// resolved value violates the schema, and propagates runtime step errors.
    pub fn get_value(&self, path_key: &str) -> StratumResult<Value> {
        tracing::debug!(path_key, "resolving configuration");
        let resolution = self.resolve_layers(path_key)?;
        let checked = self.schema.validate(resolution.value())?;
        tracing::debug!(
            path_key,
            layers = resolution.layers().len(),
            "resolved configuration"
        );
        Ok(checked)
    }
}

impl<T: DeserializeOwned> ConfigResolver<T> {
    /// Resolve, validate and deserialise the configuration for `path_key`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ConfigResolver::get_value`], plus
    /// [`StratumError::Deserialize`] when the validated value does not fit `T`.
    pub fn get(&self, path_key: &str) -> StratumResult<T> {
        from_value(self.get_value(path_key)?)
    }

    /// Resolve `context` through `lookup`, then behave like
    /// [`ConfigResolver::get`].
    ///
    /// # Errors
    ///
    /// Propagates lookup errors unchanged, then the errors of
    /// [`ConfigResolver::get`].
    pub fn get_in<C, L>(&self, lookup: &L, context: &C) -> StratumResult<T>
    where
        C: ?Sized,
        L: PathKeyLookup<C> + ?Sized,
    {
        let path_key = lookup.resolve(context)?;
        self.get(&path_key)
    }
}
