//! Operational modes for the mock backend.
//!
//! - **Instant**: readings returned immediately, for unit tests
//! - **Realistic**: a per-pin delay imitating a multiplexer sweep

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operational modes for the mock backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MockMode {
    /// Zero delays - for unit tests
    #[default]
    Instant,
    /// Hardware-like sweep timing - for demos and integration tests
    Realistic,
}

impl MockMode {
    /// Delay applied before each simulated pin reading.
    pub fn pin_delay(&self, realistic: Duration) -> Duration {
        match self {
            MockMode::Instant => Duration::ZERO,
            MockMode::Realistic => realistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode() {
        assert_eq!(MockMode::default(), MockMode::Instant);
    }

    #[test]
    fn test_instant_ignores_configured_delay() {
        let delay = Duration::from_millis(2);
        assert_eq!(MockMode::Instant.pin_delay(delay), Duration::ZERO);
        assert_eq!(MockMode::Realistic.pin_delay(delay), delay);
    }
}
