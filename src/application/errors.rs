//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures reported by the remote chat service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Chat service is not ready")]
    NotReady,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Outbound gateway is closed")]
    Closed,
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Command registry errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command '{0}' is already registered")]
    Duplicate(String),
}

/// Errors reading the external now-playing source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Could not read log '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No now-playing entry in '{}'", .0.display())]
    NoEntry(PathBuf),
}

/// Errors raised by a single scheduled task tick
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_name_the_path() {
        let err = SourceError::NoEntry(PathBuf::from("/var/log/chan.log"));
        assert!(err.to_string().contains("/var/log/chan.log"));
    }
}
