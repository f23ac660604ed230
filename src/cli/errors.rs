//! CLI error types
//!
//! Everything here is fatal: the process exits non-zero without serving.

use thiserror::Error;

use crate::storage::EngineError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Fatal start-up and shutdown failures
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage boot failed: {0}")]
    Boot(#[from] EngineError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
