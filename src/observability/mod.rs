//! Observability for sofadb
//!
//! Structured JSON logging only; the server exposes no metrics surface.

mod logger;

pub use logger::{Logger, Severity};
