//! Error constructors shared by fragment file helpers.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use crate::StratumError;

/// Construct a [`StratumError::File`] for a fragment path.
pub(super) fn file_error(
    path: &Utf8Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<StratumError> {
    Arc::new(StratumError::file(path, err))
}

pub(super) fn invalid_input(path: &Utf8Path, msg: impl Into<String>) -> Arc<StratumError> {
    file_error(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidInput, msg.into()),
    )
}
