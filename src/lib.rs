//! sofadb - a small CouchDB-style document server
//!
//! Documents are JSON objects keyed by a required string `id`, stored as a
//! compact binary encoding inside an ordered transactional key-value engine.

pub mod api;
pub mod cli;
pub mod codec;
pub mod http_server;
pub mod observability;
pub mod storage;
pub mod store;
