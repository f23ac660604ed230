//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// sofadb - a small CouchDB-style document server
#[derive(Parser, Debug)]
#[command(name = "sofadb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file (defaults apply if absent)
    #[arg(long, default_value = "./sofadb.json")]
    pub config: PathBuf,

    /// Override the configured port
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the configured storage directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
