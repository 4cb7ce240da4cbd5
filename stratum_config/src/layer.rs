//! Layer metadata and transport values for resolution.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// Where a fragment applied during resolution came from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LayerSource {
    /// The resolver's default fragment.
    Defaults,
    /// The override registered for this exact path key.
    Path(String),
    /// The output of the runtime step at this registration index.
    Runtime(usize),
}

impl fmt::Display for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("defaults"),
            Self::Path(key) => write!(f, "path '{key}'"),
            Self::Runtime(index) => write!(f, "runtime step {index}"),
        }
    }
}

/// A fragment tagged with its [`LayerSource`].
#[derive(Clone, Debug)]
pub struct FragmentLayer<'a> {
    source: LayerSource,
    value: Cow<'a, Value>,
}

impl<'a> FragmentLayer<'a> {
    /// Construct a layer originating from the default fragment.
    #[must_use]
    pub const fn defaults(value: Cow<'a, Value>) -> Self {
        Self {
            source: LayerSource::Defaults,
            value,
        }
    }

    /// Construct a layer originating from a path-key override.
    #[must_use]
    pub fn path(key: impl Into<String>, value: Cow<'a, Value>) -> Self {
        Self {
            source: LayerSource::Path(key.into()),
            value,
        }
    }

    /// Construct a layer produced by a runtime step.
    #[must_use]
    pub const fn runtime(index: usize, value: Cow<'a, Value>) -> Self {
        Self {
            source: LayerSource::Runtime(index),
            value,
        }
    }

    /// Returns the source of the layer.
    #[must_use]
    pub const fn source(&self) -> &LayerSource {
        &self.source
    }

    /// Borrows the fragment carried by the layer.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns an owned JSON value representing the layer.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value.into_owned()
    }

    /// Convert this layer into a `'static` owned variant.
    #[must_use]
    pub fn into_owned(self) -> FragmentLayer<'static> {
        FragmentLayer {
            source: self.source,
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}
