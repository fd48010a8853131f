//! Error types shared across the catalog crates.

use std::fmt;

use thiserror::Error;

/// Broad classification of a failure, used for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never produced a usable HTTP response.
    Transport,
    /// The remote service rejected the query or reported errors.
    Remote,
    /// Zero results where one was expected.
    NotFound,
    /// Missing or invalid local configuration.
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Remote => "remote",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while assembling configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A service credential is absent or blank.
    #[error("Missing credential for {service}: set {variable}")]
    MissingCredential {
        service: &'static str,
        variable: &'static str,
    },

    /// The base URL could not be parsed.
    #[error("Invalid endpoint URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A numeric setting was out of range or unparsable.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    /// Config file could not be parsed.
    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}
