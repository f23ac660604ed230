//! Storage engine error types

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Failures surfaced by the storage engine adapter
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be opened. Fatal at start-up: the process must
    /// not serve requests without storage.
    #[error("cannot open storage engine: {0}")]
    Open(String),

    /// An operation was attempted after close.
    #[error("storage engine is closed")]
    Closed,

    /// An insert that required the key to be vacant found it occupied.
    #[error("duplicate id {id:?}: insert raced an existing record")]
    DuplicateId { id: String },

    /// Any engine-reported failure: lock conflicts, I/O errors, aborted
    /// transactions. Never masked, always propagated to the request.
    #[error("storage engine failure: {0}")]
    Engine(#[from] redb::Error),
}
