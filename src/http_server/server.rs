//! Serving loop
//!
//! Binds the configured address and serves the document router until
//! ctrl-c. Shutdown is graceful so in-flight transactions finish and the
//! caller can close the engine afterwards.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::observability::Logger;
use crate::store::DocumentStore;

use super::config::ServerConfig;
use super::routes::document_routes;

/// HTTP server for the document store.
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: ServerConfig, store: Arc<DocumentStore>) -> Self {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let router = document_routes(store).layer(cors);
        Self { config, router }
    }

    /// The bind address string.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The built router (for tests).
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until interrupted.
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("bind address: {e}")))?;
        let listener = TcpListener::bind(addr).await?;
        Logger::info("SERVER_START", &[("addr", &addr.to_string())]);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    Logger::info("SERVER_SHUTDOWN", &[]);
}
