//! Backend health reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which acquisition backend is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BackendMode {
    /// Simulated results
    Mock,
    /// Analog multiplexer on digital I/O lines
    Gpio,
    /// Remote test service over HTTP
    Http,
    /// Configured mode string was not recognized
    Unknown,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Mock => "MOCK",
            BackendMode::Gpio => "GPIO",
            BackendMode::Http => "HTTP",
            BackendMode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown backend mode: {0}")]
pub struct UnknownModeError(pub String);

impl FromStr for BackendMode {
    type Err = UnknownModeError;

    /// Parse `MOCK`, `GPIO` or `HTTP` (case-insensitive).
    ///
    /// `UNKNOWN` is not accepted; it only describes a failed selection.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MOCK" => Ok(BackendMode::Mock),
            "GPIO" => Ok(BackendMode::Gpio),
            "HTTP" => Ok(BackendMode::Http),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

/// Result of a health probe, produced on demand and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub backend_mode: BackendMode,
    pub detail: String,
}

impl HealthStatus {
    pub fn healthy(mode: BackendMode, detail: impl Into<String>) -> Self {
        Self {
            ok: true,
            backend_mode: mode,
            detail: detail.into(),
        }
    }

    pub fn unhealthy(mode: BackendMode, detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            backend_mode: mode,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.ok { "OK" } else { "UNHEALTHY" };
        write!(f, "[{}] {}: {}", self.backend_mode, state, self.detail)
    }
}
