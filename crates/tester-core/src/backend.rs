//! The acquisition backend contract.
//!
//! Every signal source (simulation, multiplexer, remote service) implements
//! [`AcquisitionBackend`]. The contract is narrow:
//!
//! - `health()` answers on demand and may carry raw diagnostic text
//! - `run_test()` is total: it returns exactly one status per requested pin
//!   and degrades failures to [`RawPinStatus::Unknown`] instead of erroring
//!
//! A backend is chosen once at startup and never swapped at runtime.

use crate::health::{BackendMode, HealthStatus};
use crate::pin::{PinId, PinMap};
use crate::status::RawPinStatus;
use async_trait::async_trait;

#[async_trait]
pub trait AcquisitionBackend: Send + Sync {
    /// Mode this backend was built for.
    fn mode(&self) -> BackendMode;

    /// Probe the backend.
    async fn health(&self) -> HealthStatus;

    /// Acquire one status for every pin in `pins`, in order.
    async fn run_test(&self, pins: &[PinId]) -> PinMap<RawPinStatus>;
}

/// Every pin reported as [`RawPinStatus::Unknown`].
pub fn all_unknown(pins: &[PinId]) -> PinMap<RawPinStatus> {
    PinMap::filled(pins, RawPinStatus::Unknown)
}

/// Stand-in for a configured mode that does not exist.
///
/// Health is reported as unhealthy with the offending mode string, and
/// every test returns all pins Unknown. The process keeps running so the
/// operator can see the problem on screen.
#[derive(Debug, Clone)]
pub struct UnconfiguredBackend {
    requested: String,
}

impl UnconfiguredBackend {
    pub fn new(requested: impl Into<String>) -> Self {
        Self {
            requested: requested.into(),
        }
    }
}

#[async_trait]
impl AcquisitionBackend for UnconfiguredBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Unknown
    }

    async fn health(&self) -> HealthStatus {
        HealthStatus::unhealthy(
            BackendMode::Unknown,
            format!("Unknown backend mode: {}", self.requested),
        )
    }

    async fn run_test(&self, pins: &[PinId]) -> PinMap<RawPinStatus> {
        tracing::warn!(
            mode = %self.requested,
            pins = pins.len(),
            "No usable backend configured; reporting all pins unknown"
        );
        all_unknown(pins)
    }
}
