//! Remote fetch error types.

use catalog_core::{ConfigError, ErrorKind, Service};
use thiserror::Error;

/// Errors produced while executing a query against a remote endpoint.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx HTTP status.
    #[error("Response not successful: Received status code {status}")]
    Http { status: u16, body: String },

    /// The service answered with GraphQL errors.
    #[error("{}", first_message(.messages))]
    Remote { messages: Vec<String> },

    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A query was sent to the client of the wrong service.
    #[error("{operation} must be sent to the {expected} endpoint, not {actual}")]
    Misrouted {
        operation: &'static str,
        expected: Service,
        actual: Service,
    },

    /// The endpoint URL could not be built.
    #[error("{0}")]
    Config(String),
}

fn first_message(messages: &[String]) -> &str {
    messages
        .first()
        .map(String::as_str)
        .unwrap_or("Remote service reported an error")
}

impl FetchError {
    /// Classification for log fields.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::Http { .. } | FetchError::Remote { .. } | FetchError::Decode(_) => {
                ErrorKind::Remote
            }
            FetchError::Misrouted { .. } | FetchError::Config(_) => ErrorKind::Config,
        }
    }

    /// Message shown to users, verbatim.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<ConfigError> for FetchError {
    fn from(e: ConfigError) -> Self {
        FetchError::Config(e.to_string())
    }
}
