use crate::error::RemoteError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the remote test service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base URL; `/health` and `/test` are appended
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            timeout: Duration::from_secs(2),
        }
    }
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), RemoteError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(RemoteError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RemoteError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got '{url}'"
            )));
        }
        if self.timeout.is_zero() {
            return Err(RemoteError::InvalidConfig(
                "timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// `{base}/{path}` without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
