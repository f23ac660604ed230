//! Document store error types

use thiserror::Error;

use crate::codec::CodecError;
use crate::storage::EngineError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by the document store service
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed request payload: wrong shape, missing or nil id, and so
    /// on. Always aborts the whole batch, never retried.
    #[error("{0}")]
    Validation(String),

    /// A stored value failed to decode. Indicates storage corruption for
    /// that record; a List scan fails outright rather than skipping it.
    #[error("corrupt record {id:?}: {source}")]
    Corrupt { id: String, source: CodecError },

    /// Bounded id generation ran out of attempts without finding a vacant
    /// key.
    #[error("could not allocate a fresh document id after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },

    /// Engine failure: conflicts, I/O, aborted transactions.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl StoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }
}
