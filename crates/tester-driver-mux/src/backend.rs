//! [`AcquisitionBackend`] over the multiplexer.

use crate::config::MuxConfig;
use crate::error::Result;
use crate::gpio::GpioProvider;
use crate::sweep::sweep;
use async_trait::async_trait;
use std::sync::Arc;
use tester_core::{
    all_unknown, AcquisitionBackend, BackendMode, HealthStatus, PinId, PinMap, RawPinStatus,
};
use tracing::{error, info, warn};

/// Multiplexer backend.
///
/// Each `run_test` opens the bus, sweeps every requested pin and releases
/// the bus again on a blocking worker thread, so the async runtime is never
/// stalled by settle delays.
#[derive(Debug, Clone)]
pub struct MuxBackend {
    config: Arc<MuxConfig>,
    provider: Arc<dyn GpioProvider>,
}

impl MuxBackend {
    pub fn new(config: MuxConfig, provider: Arc<dyn GpioProvider>) -> Result<Self> {
        config.validate()?;
        info!(
            provider = provider.name(),
            select = ?config.select_lines,
            enable = config.enable_line,
            signal = config.signal_line,
            "Multiplexer backend configured"
        );
        Ok(Self {
            config: Arc::new(config),
            provider,
        })
    }

    pub fn config(&self) -> &MuxConfig {
        &self.config
    }
}

#[async_trait]
impl AcquisitionBackend for MuxBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Gpio
    }

    async fn health(&self) -> HealthStatus {
        let provider = Arc::clone(&self.provider);
        let probe = tokio::task::spawn_blocking(move || provider.open().map(drop)).await;

        match probe {
            Ok(Ok(())) => HealthStatus::healthy(
                BackendMode::Gpio,
                format!("GPIO ready ({})", self.provider.name()),
            ),
            Ok(Err(e)) => {
                HealthStatus::unhealthy(BackendMode::Gpio, format!("GPIO unavailable: {e}"))
            }
            Err(e) => HealthStatus::unhealthy(
                BackendMode::Gpio,
                format!("GPIO probe aborted: {e}"),
            ),
        }
    }

    async fn run_test(&self, pins: &[PinId]) -> PinMap<RawPinStatus> {
        let provider = Arc::clone(&self.provider);
        let config = Arc::clone(&self.config);
        let request = pins.to_vec();

        let outcome = tokio::task::spawn_blocking(move || {
            let mut bus = provider.open()?;
            sweep(bus.as_mut(), &config, &request)
        })
        .await;

        match outcome {
            Ok(Ok(readings)) => readings,
            Ok(Err(e)) => {
                warn!(error = %e, pins = pins.len(), "Multiplexer sweep failed");
                all_unknown(pins)
            }
            Err(e) => {
                error!(error = %e, pins = pins.len(), "Multiplexer sweep aborted");
                all_unknown(pins)
            }
        }
    }
}
