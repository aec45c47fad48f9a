//! Simulated acquisition backend.

use crate::mode::MockMode;
use crate::rng::MockRng;
use async_trait::async_trait;
use std::time::Duration;
use tester_core::{AcquisitionBackend, BackendMode, HealthStatus, PinId, PinMap, RawPinStatus};
use thiserror::Error;
use tracing::debug;

// =============================================================================
// StatusDistribution
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("Probability '{name}' must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("Seen + missing probabilities exceed 1 ({0})")]
    SumExceedsOne(f64),
}

/// Probabilities used to draw a simulated pin status.
///
/// Unknown takes whatever probability is left after Seen and Missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusDistribution {
    seen: f64,
    missing: f64,
}

impl StatusDistribution {
    pub fn new(seen: f64, missing: f64) -> Result<Self, DistributionError> {
        for (name, value) in [("seen", seen), ("missing", missing)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DistributionError::OutOfRange { name, value });
            }
        }
        let sum = seen + missing;
        if sum > 1.0 + f64::EPSILON {
            return Err(DistributionError::SumExceedsOne(sum));
        }
        Ok(Self { seen, missing })
    }

    pub fn seen(&self) -> f64 {
        self.seen
    }

    pub fn missing(&self) -> f64 {
        self.missing
    }

    pub fn unknown(&self) -> f64 {
        (1.0 - self.seen - self.missing).max(0.0)
    }

    /// Map a uniform draw in [0, 1) onto a status via cumulative thresholds.
    pub fn classify(&self, draw: f64) -> RawPinStatus {
        if draw < self.seen {
            RawPinStatus::Seen
        } else if draw < self.seen + self.missing {
            RawPinStatus::Missing
        } else {
            RawPinStatus::Unknown
        }
    }
}

impl Default for StatusDistribution {
    /// 0.85 / 0.12 / 0.03
    fn default() -> Self {
        Self {
            seen: 0.85,
            missing: 0.12,
        }
    }
}

// =============================================================================
// MockBackend
// =============================================================================

/// Backend that draws an independent simulated status for every pin.
#[derive(Debug)]
pub struct MockBackend {
    rng: MockRng,
    distribution: StatusDistribution,
    mode: MockMode,
    pin_delay: Duration,
}

impl MockBackend {
    /// Unseeded backend with the default distribution.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    pub fn distribution(&self) -> StatusDistribution {
        self.distribution
    }

    fn draw(&self) -> RawPinStatus {
        self.distribution.classify(self.rng.next_f64())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AcquisitionBackend for MockBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Mock
    }

    async fn health(&self) -> HealthStatus {
        HealthStatus::healthy(BackendMode::Mock, "Simulation active")
    }

    async fn run_test(&self, pins: &[PinId]) -> PinMap<RawPinStatus> {
        let delay = self.mode.pin_delay(self.pin_delay);
        let mut readings = PinMap::with_capacity(pins.len());

        for pin in pins {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            readings.insert(pin.clone(), self.draw());
        }

        debug!(
            pins = pins.len(),
            seed = ?self.rng.seed(),
            "Simulated continuity sweep complete"
        );
        readings
    }
}

/// Builder for [`MockBackend`].
#[derive(Debug, Default)]
pub struct MockBackendBuilder {
    rng: Option<MockRng>,
    distribution: StatusDistribution,
    mode: MockMode,
    pin_delay: Option<Duration>,
}

impl MockBackendBuilder {
    /// Fixed seed for reproducible sweeps.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(MockRng::seeded(seed));
        self
    }

    /// Inject a random source directly.
    pub fn rng(mut self, rng: MockRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn distribution(mut self, distribution: StatusDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn mode(mut self, mode: MockMode) -> Self {
        self.mode = mode;
        self
    }

    /// Per-pin delay used in [`MockMode::Realistic`] (default 2ms).
    pub fn pin_delay(mut self, delay: Duration) -> Self {
        self.pin_delay = Some(delay);
        self
    }

    pub fn build(self) -> MockBackend {
        MockBackend {
            rng: self.rng.unwrap_or_default(),
            distribution: self.distribution,
            mode: self.mode,
            pin_delay: self.pin_delay.unwrap_or(Duration::from_millis(2)),
        }
    }
}
