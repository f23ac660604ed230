//! CLI for sofadb
//!
//! One job: parse flags, load config, open the engine, serve, close the
//! engine. A storage open failure is fatal before any request is served.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{run, start};
pub use errors::{CliError, CliResult};
