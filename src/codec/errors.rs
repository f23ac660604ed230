//! Codec error types
//!
//! Every variant indicates a corrupt or foreign byte sequence; callers must
//! treat any of them as a corrupt-record condition for the containing key.

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Decode faults for the binary value format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unknown value tag {tag} at byte {offset}")]
    UnknownTag { tag: u8, offset: usize },

    #[error("truncated value: wanted {wanted} bytes at byte {offset}, {available} available")]
    Truncated {
        wanted: usize,
        available: usize,
        offset: usize,
    },

    #[error("invalid boolean byte {value} at byte {offset}")]
    InvalidBoolean { value: u8, offset: usize },

    #[error("invalid UTF-8 in encoded string at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("unparsable number literal {literal:?}")]
    InvalidNumber { literal: String },

    #[error("value nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("{count} trailing bytes after the root value")]
    TrailingBytes { count: usize },
}
