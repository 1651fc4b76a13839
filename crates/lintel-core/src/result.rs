//! Result alias and recovery helpers

use crate::error::LintelError;

/// Result of lintel operations
pub type Result<T> = std::result::Result<T, LintelError>;

/// Recovery from per-file failures
pub trait ResultExt<T> {
    /// Turn a recoverable error into `Ok(None)` after logging it
    ///
    /// Fatal errors pass through unchanged.
    fn recoverable(self) -> Result<Option<T>>;
}

impl<T> ResultExt<T> for Result<T> {
    fn recoverable(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Skipping after recoverable error: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
