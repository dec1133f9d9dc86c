//! # CLI
//!
//! This module defines the command-line interface of `rever` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring headers are `key:value`),
//! and for layering flags on top of an optional JSON config file.
use clap::Parser;
use rever_core::{ClientConfig, Endpoint, config::ConfigError};
use std::path::PathBuf;

pub const DEFAULT_DATA: &str = "Hello, World";

#[derive(Parser, Debug)]
#[command(name = "rever", version, about = "Reverse a string with a remote gRPC service")]
pub struct Cli {
    /// The string to reverse
    #[arg(default_value = DEFAULT_DATA)]
    pub data: String,

    /// Address of the reverse service as host:port (e.g. [::1]:50051)
    #[arg(long, value_parser = parse_endpoint, conflicts_with_all = ["host", "port"])]
    pub endpoint: Option<Endpoint>,

    /// Host of the reverse service (default: 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port of the reverse service (default: 50051)
    #[arg(long)]
    pub port: Option<u16>,

    /// Call deadline in milliseconds (default: 10000)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Connection timeout in milliseconds (default: 5000)
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    /// Metadata to attach to the call, may be repeated
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolves the client configuration: defaults, then the config file, then flags.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        } else if self.host.is_some() || self.port.is_some() {
            let host = self
                .host
                .clone()
                .unwrap_or_else(|| config.endpoint.host().to_string());
            let port = self.port.unwrap_or(config.endpoint.port());
            config.endpoint = Endpoint::new(host, port);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = self.connect_timeout_ms {
            config.connect_timeout_ms = connect_timeout_ms;
        }
        config.headers.extend(self.headers.iter().cloned());

        Ok(config)
    }
}

fn parse_endpoint(value: &str) -> Result<Endpoint, String> {
    value.parse().map_err(|e: rever_core::endpoint::EndpointParseError| e.to_string())
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| "Format must be 'key:value'".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_reference_call() {
        let cli = Cli::try_parse_from(["rever"]).unwrap();
        assert_eq!(cli.data, "Hello, World");

        let config = cli.client_config().unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn flags_override_endpoint_and_deadlines() {
        let cli = Cli::try_parse_from([
            "rever",
            "abc",
            "--host",
            "localhost",
            "--port",
            "6000",
            "--timeout-ms",
            "250",
            "-H",
            "x-trace: 42",
        ])
        .unwrap();

        let config = cli.client_config().unwrap();

        assert_eq!(cli.data, "abc");
        assert_eq!(config.endpoint, Endpoint::new("localhost", 6000));
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(
            config.headers,
            vec![("x-trace".to_string(), "42".to_string())]
        );
    }

    #[test]
    fn port_flag_keeps_default_host() {
        let cli = Cli::try_parse_from(["rever", "--port", "7000"]).unwrap();

        let config = cli.client_config().unwrap();

        assert_eq!(config.endpoint, Endpoint::new("127.0.0.1", 7000));
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("rever-cli-{}.json", std::process::id()));
        let file = serde_json::json!({
            "endpoint": { "host": "10.1.1.1", "port": 9000 },
            "timeout_ms": 100,
            "headers": [["x-from", "file"]]
        });
        std::fs::write(&path, file.to_string()).unwrap();

        let cli = Cli::try_parse_from([
            "rever",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "9001",
            "-H",
            "x-from:flag",
        ])
        .unwrap();
        let config = cli.client_config();
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.endpoint, Endpoint::new("10.1.1.1", 9001));
        assert_eq!(config.timeout_ms, 100);
        assert_eq!(
            config.headers,
            vec![
                ("x-from".to_string(), "file".to_string()),
                ("x-from".to_string(), "flag".to_string())
            ]
        );
    }

    #[test]
    fn endpoint_flag_sets_host_and_port() {
        let cli = Cli::try_parse_from(["rever", "--endpoint", "[::1]:6000"]).unwrap();

        let config = cli.client_config().unwrap();

        assert_eq!(config.endpoint, Endpoint::new("::1", 6000));
        assert_eq!(config.endpoint.uri(), "http://[::1]:6000");
    }

    #[test]
    fn endpoint_flag_rejects_missing_port() {
        let err = Cli::try_parse_from(["rever", "--endpoint", "localhost"]).unwrap_err();
        assert!(err.to_string().contains("Expected 'host:port'"));
    }

    #[test]
    fn endpoint_flag_conflicts_with_host() {
        assert!(
            Cli::try_parse_from(["rever", "--endpoint", "a:1", "--host", "b"]).is_err()
        );
    }

    #[test]
    fn bracketed_host_flag_forms_a_valid_uri() {
        let cli = Cli::try_parse_from(["rever", "--host", "[::1]"]).unwrap();

        let config = cli.client_config().unwrap();

        assert_eq!(config.endpoint.uri(), "http://[::1]:50051");
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(Cli::try_parse_from(["rever", "-H", "no-colon"]).is_err());
    }
}
