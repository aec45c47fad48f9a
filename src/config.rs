//! Application configuration using Figment.
//!
//! Sources, later ones winning:
//! 1. built-in defaults (the stock tester wiring)
//! 2. `config/cable_tester.toml` (or the file passed with `--config`)
//! 3. environment variables prefixed `CABLE_TESTER_`, nested with `__`,
//!    e.g. `CABLE_TESTER_BACKEND__MODE=http`
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [backend]
//! mode = "GPIO"
//! pin_count = 32
//!
//! [backend.gpio]
//! select_lines = [5, 6, 13, 19]
//! enable_line = 26
//! signal_line = 21
//! settle = "2ms"
//! ```

use crate::error::ConfigError;
use crate::logging::{parse_log_level, LogFormat};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tester_core::BackendMode;
use tester_driver_http::HttpConfig;
use tester_driver_mock::MockMode;
use tester_driver_mux::MuxConfig;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/cable_tester.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CABLE_TESTER_";

/// Root of the configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `[application]`
    pub application: ApplicationConfig,
    /// `[backend]` and its subsections
    pub backend: BackendConfig,
    /// `[touch]`
    pub touch: TouchConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Shown in the startup log line
    pub name: String,
    /// trace, debug, info, warn or error
    pub log_level: String,
    /// pretty, compact or json
    pub log_format: LogFormat,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "Cable Tester".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

/// Backend selection plus the settings of every backend.
///
/// Only the section matching `mode` is used and validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// MOCK, GPIO or HTTP (case-insensitive)
    pub mode: String,
    /// Pins swept by the bench pinout
    pub pin_count: usize,
    /// Multiplexer wiring (GPIO mode)
    pub gpio: MuxConfig,
    /// Remote test service (HTTP mode)
    pub http: HttpConfig,
    /// Simulation (MOCK mode)
    pub mock: MockConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Mock.to_string(),
            pin_count: 32,
            gpio: MuxConfig::default(),
            http: HttpConfig::default(),
            mock: MockConfig::default(),
        }
    }
}

impl BackendConfig {
    /// Parsed mode, or `None` for an unrecognized string.
    pub fn parsed_mode(&self) -> Option<BackendMode> {
        self.mode.parse().ok()
    }
}

/// Simulated backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Fixed seed for reproducible results; random when unset
    pub seed: Option<u64>,
    /// instant or realistic
    pub mode: MockMode,
    /// Per-pin delay in realistic mode
    #[serde(with = "humantime_serde")]
    pub pin_delay: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mode: MockMode::default(),
            pin_delay: Duration::from_millis(2),
        }
    }
}

/// Touch panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Hold time before a press activates its control
    #[serde(with = "humantime_serde")]
    pub confirm_delay: Duration,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            confirm_delay: Duration::from_millis(tester_touch::DEFAULT_CONFIRM_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// Load from [`DEFAULT_CONFIG_PATH`] and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from `path` and the environment. A missing file is not an
    /// error; defaults apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: AppConfig = Self::figment(path.as_ref()).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the TOML file at `path`, then the environment.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_log_level(&self.application.log_level)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.backend.pin_count == 0 {
            return Err(ConfigError::Invalid(
                "backend.pin_count must be greater than 0".to_string(),
            ));
        }

        match self.backend.parsed_mode() {
            Some(BackendMode::Gpio) => self
                .backend
                .gpio
                .validate()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            Some(BackendMode::Http) => self
                .backend
                .http
                .validate()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            // An unrecognized mode still starts; the backend reports unhealthy.
            Some(BackendMode::Mock) | Some(BackendMode::Unknown) | None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_wiring() {
        let config = AppConfig::default();
        assert_eq!(config.backend.parsed_mode(), Some(BackendMode::Mock));
        assert_eq!(config.backend.pin_count, 32);
        assert_eq!(config.backend.gpio.select_lines, [5, 6, 13, 19]);
        assert_eq!(config.backend.gpio.enable_line, 26);
        assert_eq!(config.backend.gpio.signal_line, 21);
        assert_eq!(config.backend.http.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.touch.confirm_delay, Duration::from_millis(80));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.application.log_level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_pin_count() {
        let mut config = AppConfig::default();
        config.backend.pin_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gpio_lines_checked_only_in_gpio_mode() {
        let mut config = AppConfig::default();
        config.backend.gpio.signal_line = config.backend.gpio.enable_line;
        assert!(config.validate().is_ok());

        config.backend.mode = "gpio".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_mode_is_not_a_config_error() {
        let mut config = AppConfig::default();
        config.backend.mode = "SERIAL".to_string();
        assert_eq!(config.backend.parsed_mode(), None);
        assert!(config.validate().is_ok());
    }
}
