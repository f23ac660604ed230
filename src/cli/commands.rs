//! Start-up and shutdown wiring

use std::sync::Arc;

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::Logger;
use crate::storage::Engine;
use crate::store::DocumentStore;

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the server to completion.
pub fn run() -> CliResult<()> {
    start(Cli::parse_args())
}

/// Boot the engine and serve until interrupted.
pub fn start(cli: Cli) -> CliResult<()> {
    let mut config = ServerConfig::load_or_default(&cli.config)
        .map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let engine = match Engine::open(&config.data_dir) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            Logger::fatal("ENGINE_OPEN_FAILED", &[("error", &e.to_string())]);
            return Err(e.into());
        }
    };
    let store = Arc::new(DocumentStore::new(engine.clone()));
    let server = HttpServer::new(config, store);

    let runtime = tokio::runtime::Runtime::new()?;
    let served = runtime.block_on(server.start());
    drop(runtime);

    // The serve loop has ended and its store handles are gone; close the
    // engine explicitly so compaction runs before the process exits. If a
    // straggling handle survives, Engine's Drop covers it.
    if let Ok(mut engine) = Arc::try_unwrap(engine) {
        engine.close();
    }
    served.map_err(CliError::Io)
}
