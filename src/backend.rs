//! Backend selection.

use crate::config::BackendConfig;
use std::sync::Arc;
use tester_core::{AcquisitionBackend, BackendMode, DriverError, UnconfiguredBackend};
use tester_driver_http::RemoteBackend;
use tester_driver_mock::MockBackend;
use tester_driver_mux::{default_provider, GpioProvider, MuxBackend};
use tracing::{info, warn};

/// Build the backend named by `config.mode`.
///
/// An unrecognized mode yields an [`UnconfiguredBackend`] so the tester
/// still starts and shows the problem. Construction failures of a known
/// backend are returned as errors.
pub fn build_backend(config: &BackendConfig) -> Result<Arc<dyn AcquisitionBackend>, DriverError> {
    build_backend_with_gpio(config, default_provider())
}

/// Like [`build_backend`], with an explicit GPIO provider for GPIO mode.
pub fn build_backend_with_gpio(
    config: &BackendConfig,
    gpio: Arc<dyn GpioProvider>,
) -> Result<Arc<dyn AcquisitionBackend>, DriverError> {
    let backend: Arc<dyn AcquisitionBackend> = match config.parsed_mode() {
        Some(BackendMode::Mock) => {
            let mut builder = MockBackend::builder()
                .mode(config.mock.mode)
                .pin_delay(config.mock.pin_delay);
            if let Some(seed) = config.mock.seed {
                builder = builder.seed(seed);
            }
            Arc::new(builder.build())
        }
        Some(BackendMode::Gpio) => Arc::new(MuxBackend::new(config.gpio.clone(), gpio)?),
        Some(BackendMode::Http) => Arc::new(RemoteBackend::new(config.http.clone())?),
        None | Some(BackendMode::Unknown) => {
            warn!(mode = %config.mode, "Unrecognized backend mode");
            return Ok(Arc::new(UnconfiguredBackend::new(config.mode.clone())));
        }
    };

    info!(mode = %backend.mode(), "Acquisition backend ready");
    Ok(backend)
}
