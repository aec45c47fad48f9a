//! Error types for the cable tester application.
//!
//! Acquisition failures never show up here: backends degrade them to
//! Unknown pins. These errors cover what the operator or the deployment got
//! wrong: a bad config file, a pinout that does not exist, a second test
//! launched while one is still running.

use tester_core::PinoutError;
use thiserror::Error;

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File or environment could not be parsed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// Parsed, but the values make no sense
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}

/// Catalog construction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two pinouts share a key
    #[error("Duplicate pinout key: {0}")]
    DuplicateKey(String),

    /// A pinout definition was rejected
    #[error(transparent)]
    Pinout(#[from] PinoutError),
}

/// Operator actions the session refuses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No pinout with this key
    #[error("Unknown pinout: {0}")]
    UnknownPinout(String),

    /// Another test has not finished yet
    #[error("A test is already running")]
    TestInProgress,
}
