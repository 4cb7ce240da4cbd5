//! Hierarchical, path-keyed configuration resolution.
//!
//! A [`ConfigResolver`] owns a [`schema::Schema`], a default fragment, a map
//! from slash-delimited path keys (`dev/region1/staging`) to override
//! fragments, and an ordered list of runtime steps. Resolving a path key
//! folds the default, every ancestor's override from least to most specific,
//! and then each runtime step, before validating the result against the
//! schema.
//!
//! Fragments are [`serde_json::Value`] trees merged with [`deep_merge`]:
//! mappings merge recursively, arrays and scalars replace, and an explicit
//! `null` erases the value underneath it.
//!
//! # Example
//!
//! ```rust
//! use stratum_config::ConfigResolver;
//! use stratum_config::schema::{Field, Schema};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct Service {
//!     name: String,
//!     replicas: u32,
//! }
//!
//! let schema = Schema::new()
//!     .field("name", Field::string())
//!     .field("replicas", Field::integer().with_default(1));
//!
//! let mut resolver: ConfigResolver<Service> = ConfigResolver::new(schema)?;
//! resolver
//!     .set("dev", json!({"name": "svc"}))
//!     .set("dev/staging", json!({"replicas": 3}));
//!
//! let staging = resolver.get("dev/staging")?;
//! assert_eq!(staging, Service { name: "svc".into(), replicas: 3 });
//! # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
//! ```

mod convert;
mod error;
mod file;
mod layer;
mod merge;
pub mod path;
mod resolver;
mod result_ext;
pub mod schema;
pub mod scope;

use std::sync::Arc;

pub use convert::from_value;
pub use error::{AggregatedErrors, StratumError, is_validation_failure};
pub use file::load_fragment;
pub use layer::{FragmentLayer, LayerSource};
pub use merge::{deep_merge, merge_value};
pub use path::ancestors;
pub use resolver::{
    ConfigResolver, LiteralPathKey, PathKeyLookup, Resolution, RuntimeContext, RuntimeStep,
};
pub use result_ext::StratumResultExt;

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so they can be aggregated and cloned
/// cheaply.
pub type StratumResult<T> = Result<T, Arc<StratumError>>;
