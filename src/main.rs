//! sofadb entry point
//!
//! Parses CLI arguments and boots the server via cli::run. All start-up
//! logic (config loading, engine open, serving loop) lives in the CLI
//! module; main only maps failures to a non-zero exit.

use sofadb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
