//! HTTP transport for sofadb
//!
//! A single router exposes the four document operations:
//!
//! - `GET /` — list with `startkey`/`endkey`/`limit`/`start`
//! - `GET /:id` — point lookup (404 + `null` when absent)
//! - `PUT|POST /` — bulk put, 201 on success
//! - `DELETE /` — bulk delete, 200 on success

mod config;
mod routes;
mod server;

pub use config::ServerConfig;
pub use routes::document_routes;
pub use server::HttpServer;
