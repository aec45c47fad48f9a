//! Error types for multiplexer operations.

use tester_core::{DriverError, DriverErrorKind};
use thiserror::Error;

/// Result type alias for multiplexer operations.
pub type Result<T> = std::result::Result<T, MuxError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MuxError {
    /// Built without a GPIO implementation for this platform
    #[error("GPIO support not compiled in (rebuild with the `rpi` feature)")]
    Unsupported,

    /// GPIO peripheral could not be opened (missing device node, permissions)
    #[error("Failed to initialize GPIO: {0}")]
    Init(String),

    /// A line could not be claimed
    #[error("GPIO line {line} unavailable: {message}")]
    LineUnavailable { line: u8, message: String },

    /// Line used without being claimed in the required direction
    #[error("GPIO line {line} is not claimed as {expected}")]
    NotClaimed { line: u8, expected: &'static str },

    /// Read or write failed on a claimed line
    #[error("I/O error on GPIO line {line}: {message}")]
    Io { line: u8, message: String },

    #[error("Channel {0} out of range (0..=15)")]
    InvalidChannel(u8),

    #[error("Invalid multiplexer configuration: {0}")]
    InvalidConfig(String),
}

impl MuxError {
    pub fn kind(&self) -> DriverErrorKind {
        match self {
            MuxError::Unsupported | MuxError::Init(_) => DriverErrorKind::Initialization,
            MuxError::LineUnavailable { .. } | MuxError::NotClaimed { .. } => {
                DriverErrorKind::Configuration
            }
            MuxError::Io { .. } => DriverErrorKind::Hardware,
            MuxError::InvalidChannel(_) | MuxError::InvalidConfig(_) => {
                DriverErrorKind::Configuration
            }
        }
    }
}

impl From<MuxError> for DriverError {
    fn from(err: MuxError) -> Self {
        DriverError::new("mux", err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_into_driver_error() {
        let err: DriverError = MuxError::Io {
            line: 21,
            message: "read failed".into(),
        }
        .into();
        assert_eq!(err.kind, DriverErrorKind::Hardware);
        assert_eq!(err.driver_type, "mux");
        assert!(err.message.contains("line 21"));
    }

    #[test]
    fn unsupported_is_an_initialization_error() {
        assert_eq!(MuxError::Unsupported.kind(), DriverErrorKind::Initialization);
        assert!(MuxError::Unsupported.to_string().contains("`rpi` feature"));
    }
}
