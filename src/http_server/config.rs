//! Server configuration
//!
//! Loaded from a JSON file when one exists; every field has a default so a
//! bare start works without any configuration. CLI flags override fields
//! after loading.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// HTTP server and storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory the storage engine lives in (created if absent)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5984
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./sofadb-data")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
        }
    }
}

impl ServerConfig {
    /// Load from a JSON config file; a missing file yields the defaults,
    /// but an unreadable or malformed file is an error.
    pub fn load_or_default(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {}", path.display(), e),
            )
        })
    }

    /// The bind address string.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
