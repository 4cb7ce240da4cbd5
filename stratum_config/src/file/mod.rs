//! Loading override fragments from files.

mod error;
mod parser;

use camino::Utf8Path;
use serde_json::Value;

use crate::StratumResult;

use error::file_error;

/// Read and parse a fragment from a `.json` or `.toml` file.
///
/// # Errors
///
/// Returns [`crate::StratumError::File`] when the file cannot be read, has an
/// unsupported extension or fails to parse.
pub fn load_fragment(path: &Utf8Path) -> StratumResult<Value> {
    let data = std::fs::read_to_string(path).map_err(|e| file_error(path, e))?;
    let fragment = parser::parse_fragment_by_format(path, &data)?;
    tracing::debug!(path = %path, "loaded fragment file");
    Ok(fragment)
}
