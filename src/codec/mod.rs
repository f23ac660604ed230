//! Binary value codec for sofadb
//!
//! Maps a JSON document value onto a compact tag-prefixed binary form and
//! back. The encoding is self-describing and recursive; object member order
//! is preserved exactly, which is why the crate enables serde_json's
//! `preserve_order` feature.
//!
//! Decoding is strict: an unknown tag, a truncated buffer, or bytes left
//! over after the root value are all reported as a `CodecError` so that a
//! corrupt stored record is surfaced instead of silently read as a default.

mod binary;
mod errors;

pub use binary::{decode, encode};
pub use errors::{CodecError, CodecResult};
