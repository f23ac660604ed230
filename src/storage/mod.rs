//! Storage engine adapter for sofadb
//!
//! Wraps the ordered key-value engine (redb) behind the handful of
//! operations the document store needs: point reads, transactional
//! upsert/insert/delete batches, and forward cursors over the key order.
//!
//! Keys are document ids stored as UTF-8 strings; the engine orders them by
//! byte-for-byte comparison, which is the only ordering the store exposes.
//! No redb type leaks out of this module.

mod engine;
mod errors;
mod txn;

pub use engine::Engine;
pub use errors::{EngineError, EngineResult};
pub use txn::{Cursor, Snapshot, WriteBatch};
