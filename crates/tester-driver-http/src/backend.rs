//! [`AcquisitionBackend`] backed by a remote test service.

use crate::config::HttpConfig;
use crate::error::RemoteError;
use async_trait::async_trait;
use serde_json::Value;
use tester_core::{
    all_unknown, AcquisitionBackend, BackendMode, HealthStatus, PinId, PinMap, RawPinStatus,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: reqwest::Client,
    config: HttpConfig,
}

impl RemoteBackend {
    pub fn new(config: HttpConfig) -> Result<Self, RemoteError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            timeout = ?config.timeout,
            "Remote backend configured"
        );
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, RemoteError> {
        let url = self.config.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(response)
    }

    async fn fetch_statuses(&self, pins: &[PinId]) -> Result<PinMap<RawPinStatus>, RemoteError> {
        let body: Value = self
            .get("test")
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::from_reqwest(e, self.config.timeout))?;
        decode_statuses(pins, &body)
    }
}

/// Project a `/test` payload onto the requested pins.
///
/// Requested pins absent from the payload and entries that are not strings
/// become Unknown. Keys that were not requested are ignored.
pub fn decode_statuses(
    pins: &[PinId],
    body: &Value,
) -> Result<PinMap<RawPinStatus>, RemoteError> {
    let entries = body.as_object().ok_or_else(|| {
        RemoteError::Decode(format!("expected a JSON object, got {}", kind_of(body)))
    })?;

    let readings: PinMap<RawPinStatus> = pins
        .iter()
        .map(|pin| {
            let status = match entries.get(pin.as_str()) {
                Some(Value::String(s)) => RawPinStatus::from_wire(s),
                Some(other) => {
                    debug!(pin = %pin, value = %other, "Non-string pin status");
                    RawPinStatus::Unknown
                }
                None => RawPinStatus::Unknown,
            };
            (pin.clone(), status)
        })
        .collect();

    let extra = entries
        .keys()
        .filter(|key| !readings.contains(key.as_str()))
        .count();
    if extra > 0 {
        debug!(extra, "Ignoring unrequested pins in test response");
    }

    Ok(readings)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl AcquisitionBackend for RemoteBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Http
    }

    async fn health(&self) -> HealthStatus {
        match self.get("health").await {
            Ok(_) => HealthStatus::healthy(BackendMode::Http, "API OK"),
            Err(e) => HealthStatus::unhealthy(BackendMode::Http, e.to_string()),
        }
    }

    async fn run_test(&self, pins: &[PinId]) -> PinMap<RawPinStatus> {
        match self.fetch_statuses(pins).await {
            Ok(readings) => readings,
            Err(e) => {
                warn!(
                    error = %e,
                    base_url = %self.config.base_url,
                    pins = pins.len(),
                    "Remote test failed; reporting all pins unknown"
                );
                all_unknown(pins)
            }
        }
    }
}
