//! Error types shared by the tester crates.
//!
//! Backends never surface errors through `run_test`; a failed pin is
//! reported as [`RawPinStatus::Unknown`](crate::RawPinStatus::Unknown)
//! instead. [`DriverError`] exists so drivers can describe what went wrong in
//! logs and in health details with a consistent shape.

use thiserror::Error;

// =============================================================================
// Driver Errors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverErrorKind {
    Initialization,
    Configuration,
    Communication,
    Hardware,
    Timeout,
    Protocol,
    Unknown,
}

impl std::fmt::Display for DriverErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DriverErrorKind::Initialization => "initialization",
            DriverErrorKind::Configuration => "configuration",
            DriverErrorKind::Communication => "communication",
            DriverErrorKind::Hardware => "hardware",
            DriverErrorKind::Timeout => "timeout",
            DriverErrorKind::Protocol => "protocol",
            DriverErrorKind::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Error, Debug, Clone)]
#[error("Driver '{driver_type}' {kind} error: {message}")]
pub struct DriverError {
    pub driver_type: String,
    pub kind: DriverErrorKind,
    pub message: String,
}

impl DriverError {
    pub fn new(
        driver_type: impl Into<String>,
        kind: DriverErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            driver_type: driver_type.into(),
            kind,
            message: message.into(),
        }
    }
}

// =============================================================================
// Pinout Errors
// =============================================================================

/// Rejected pinout definitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinoutError {
    /// Pinout key was empty or whitespace
    #[error("Pinout key must not be empty")]
    EmptyKey,

    /// The same pin identifier appears twice
    #[error("Pinout '{key}' lists pin '{pin}' more than once")]
    DuplicatePin { key: String, pin: String },
}
