//! # Output Formatting
//!
//! Converts results and errors into printable, coloured strings.
use colored::*;
use rever_core::{
    client::{CallError, ConnectionError, RpcError},
    config::ConfigError,
};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// A successful reply from the service.
pub struct Reply(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Reply> for FormattedString {
    fn from(Reply(reversed): Reply) -> Self {
        FormattedString(format!("Got: {reversed}"))
    }
}

impl From<ConfigError> for FormattedString {
    fn from(err: ConfigError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Configuration Error:".red().bold(), err))
    }
}

impl From<ConnectionError> for FormattedString {
    fn from(err: ConnectionError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

impl From<RpcError> for FormattedString {
    fn from(err: RpcError) -> Self {
        FormattedString(format!(
            "{} code={:?}\n\n'{}'",
            "Call Failed:".red().bold(),
            err.code(),
            err
        ))
    }
}

impl From<CallError> for FormattedString {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Connection(err) => err.into(),
            CallError::Rpc(err) => err.into(),
        }
    }
}
