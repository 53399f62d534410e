//! Error handling for the portfolio content client

use std::fmt;
use thiserror::Error;

/// Crate-level error for setup and configuration failures
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}

/// Transport failure or non-success status on any backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NetworkError {
    /// HTTP status, when a response was received at all
    pub status: Option<u16>,

    /// Human readable description of the failure
    pub message: String,

    /// Message supplied by the server in the error body, if any
    pub detail: Option<String>,
}

impl NetworkError {
    /// A failure that never produced a response (connect error, timeout, bad URL)
    pub fn transport<T: fmt::Display>(msg: T) -> Self {
        Self {
            status: None,
            message: msg.to_string(),
            detail: None,
        }
    }

    /// A response with a non-success status code
    pub fn status(status: u16, detail: Option<String>) -> Self {
        Self {
            status: Some(status),
            message: format!("HTTP error! status: {}", status),
            detail,
        }
    }

    /// Whether the request was abandoned because it ran past the timeout
    pub fn is_timeout(&self) -> bool {
        self.status.is_none() && self.message.starts_with("Request timed out")
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return NetworkError::transport(format!("Request timed out: {}", err));
        }
        match err.status() {
            Some(status) => NetworkError::status(status.as_u16(), None),
            None => NetworkError::transport(err),
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        NetworkError::transport(format!("Invalid request URL: {}", err))
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::transport(format!("Invalid JSON payload: {}", err))
    }
}

/// Contact form input rejected before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .problems.join(" "))]
pub struct ValidationError {
    /// One sentence per failed rule, in field order
    pub problems: Vec<String>,
}

impl ValidationError {
    /// Number of rules that failed
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// True when no rule failed
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = NetworkError::status(503, Some("maintenance".to_string()));
        assert_eq!(err.status, Some(503));
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(err.detail.as_deref(), Some("maintenance"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_validation_error_joins_problems() {
        let err = ValidationError {
            problems: vec!["First.".to_string(), "Second.".to_string()],
        };
        assert_eq!(err.to_string(), "First. Second.");
        assert_eq!(err.len(), 2);
    }
}
