//! Error types for the remote backend.

use std::time::Duration;
use tester_core::{DriverError, DriverErrorKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cannot connect to test service: {0}")]
    Connect(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid HTTP configuration: {0}")]
    InvalidConfig(String),
}

impl RemoteError {
    /// Classify a `reqwest` failure.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout(timeout)
        } else if err.is_connect() {
            RemoteError::Connect(err.to_string())
        } else if let Some(status) = err.status() {
            RemoteError::Status(status.as_u16())
        } else if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Transport(err.to_string())
        }
    }

    pub fn kind(&self) -> DriverErrorKind {
        match self {
            RemoteError::Timeout(_) => DriverErrorKind::Timeout,
            RemoteError::Connect(_) | RemoteError::Transport(_) => {
                DriverErrorKind::Communication
            }
            RemoteError::Status(_) | RemoteError::Decode(_) => DriverErrorKind::Protocol,
            RemoteError::InvalidConfig(_) => DriverErrorKind::Configuration,
        }
    }
}

impl From<RemoteError> for DriverError {
    fn from(err: RemoteError) -> Self {
        DriverError::new("http", err.kind(), err.to_string())
    }
}
