use crate::error::{MuxError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Line assignment and timing for the multiplexer.
///
/// ```toml
/// [backend.gpio]
/// select_lines = [5, 6, 13, 19]   # S0..S3
/// enable_line = 26                # EN, active low
/// signal_line = 21                # SIG
/// settle = "2ms"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuxConfig {
    pub select_lines: [u8; 4],
    pub enable_line: u8,
    pub signal_line: u8,
    /// Wait after switching channels before sampling
    #[serde(with = "humantime_serde")]
    pub settle: Duration,
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            select_lines: [5, 6, 13, 19],
            enable_line: 26,
            signal_line: 21,
            settle: Duration::from_millis(2),
        }
    }
}

impl MuxConfig {
    /// All six lines must be distinct.
    pub fn validate(&self) -> Result<()> {
        let mut lines: Vec<u8> = self.lines().collect();
        lines.sort_unstable();
        if let Some(pair) = lines.windows(2).find(|w| w[0] == w[1]) {
            return Err(MuxError::InvalidConfig(format!(
                "GPIO line {} assigned more than once",
                pair[0]
            )));
        }
        Ok(())
    }

    /// Every line the sweep claims: S0..S3, EN, SIG.
    pub fn lines(&self) -> impl Iterator<Item = u8> + '_ {
        self.select_lines
            .iter()
            .copied()
            .chain([self.enable_line, self.signal_line])
    }
}
