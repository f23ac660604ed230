//! Document store service
//!
//! The four operations of the server — list, get, put, delete — expressed
//! over the storage adapter and the value codec. Put and Delete are batch
//! operations: every document in a request shares one transaction and the
//! batch commits or aborts as a whole. List runs one read snapshot per
//! request; Get is a stand-alone point read.

mod errors;
mod service;

pub use errors::{StoreError, StoreResult};
pub use service::{DocumentStore, ListQuery, ID_FIELD, TIMESTAMP_FIELD};
