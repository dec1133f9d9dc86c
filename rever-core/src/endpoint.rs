//! # Endpoint
//!
//! The network address of a reverse service instance.
//!
//! An [`Endpoint`] is a plain `host:port` pair. Channels are always plaintext HTTP/2,
//! so its URI form is `http://host:port`.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 50051;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointParseError {
    #[error("Invalid endpoint '{0}'. Expected 'host:port'")]
    MissingPort(String),
    #[error("Invalid port in endpoint '{endpoint}': '{source}'")]
    InvalidPort {
        endpoint: String,
        source: std::num::ParseIntError,
    },
    #[error("Invalid endpoint '{0}'. Host cannot be empty")]
    EmptyHost(String),
}

/// A host/port pair identifying the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawEndpoint")]
pub struct Endpoint {
    host: String,
    port: u16,
}

/// Deserialization goes through [`Endpoint::new`] so file values are normalized too.
#[derive(Deserialize)]
struct RawEndpoint {
    host: String,
    port: u16,
}

impl From<RawEndpoint> for Endpoint {
    fn from(raw: RawEndpoint) -> Self {
        Endpoint::new(raw.host, raw.port)
    }
}

impl Endpoint {
    /// Creates an endpoint. A bracketed IPv6 host (`[::1]`) is stored without its brackets.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        let host = match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            Some(inner) => inner.to_string(),
            None => host,
        };
        Self { host, port }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the plaintext URI for this endpoint (e.g. `http://127.0.0.1:50051`).
    ///
    /// IPv6 hosts are wrapped in brackets.
    pub fn uri(&self) -> String {
        format!("http://{self}")
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (host, port) = value
            .rsplit_once(':')
            .ok_or_else(|| EndpointParseError::MissingPort(value.to_string()))?;

        let host = host.trim();

        if host.is_empty() || host == "[]" {
            return Err(EndpointParseError::EmptyHost(value.to_string()));
        }

        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|source| EndpointParseError::InvalidPort {
                endpoint: value.to_string(),
                source,
            })?;

        Ok(Self::new(host, port))
    }
}
