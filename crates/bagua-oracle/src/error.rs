//! Error types for casting and reading assembly.

use bagua_core::CoreError;
use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while setting up or reading a cast.
///
/// Casting itself never fails: integrity problems during a cast degrade to
/// a flagged fallback instead.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Catalog or table error from the core model.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Content data could not be parsed.
    #[error("malformed content data: {0}")]
    Content(#[from] serde_json::Error),

    /// A configuration value that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
