//! # Client Configuration
//!
//! [`ClientConfig`] gathers everything needed to open a channel: where the service
//! lives, how long to wait for it, and which metadata to attach to each call.
//!
//! It can be loaded from a JSON file. Missing fields fall back to their defaults:
//!
//! ```json
//! {
//!   "endpoint": { "host": "127.0.0.1", "port": 50051 },
//!   "timeout_ms": 10000,
//!   "connect_timeout_ms": 5000,
//!   "headers": [["x-request-source", "rever"]]
//! }
//! ```
use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': '{source}'")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': '{source}'")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    /// Deadline applied to every call, in milliseconds.
    pub timeout_ms: u64,
    /// Upper bound for establishing the TCP connection, in milliseconds.
    pub connect_timeout_ms: u64,
    /// gRPC metadata attached to every call.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT.as_millis() as u64,
            headers: vec![],
        }
    }
}

impl ClientConfig {
    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
