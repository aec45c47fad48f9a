//! Per-pin status vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a backend observed on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawPinStatus {
    /// Signal present on the far end
    Seen,
    /// No signal on the far end
    Missing,
    /// Backend could not tell (unavailable, failed read, bad payload)
    Unknown,
}

impl RawPinStatus {
    /// Parse the wire vocabulary used by remote test services.
    ///
    /// `"seen"` and `"miss"` map to their variants; anything else, including
    /// `"unknown"`, is [`RawPinStatus::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "seen" => RawPinStatus::Seen,
            "miss" => RawPinStatus::Missing,
            _ => RawPinStatus::Unknown,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            RawPinStatus::Seen => "seen",
            RawPinStatus::Missing => "miss",
            RawPinStatus::Unknown => "unknown",
        }
    }

    /// Collapse to the operator-facing Ok/Bad vocabulary.
    pub fn normalize(self) -> NormalizedPinStatus {
        match self {
            RawPinStatus::Seen => NormalizedPinStatus::Ok,
            RawPinStatus::Missing | RawPinStatus::Unknown => NormalizedPinStatus::Bad,
        }
    }
}

impl fmt::Display for RawPinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Operator-facing pin verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedPinStatus {
    Ok,
    Bad,
}

impl NormalizedPinStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, NormalizedPinStatus::Ok)
    }

    pub fn label(&self) -> &'static str {
        match self {
            NormalizedPinStatus::Ok => "ok",
            NormalizedPinStatus::Bad => "bad",
        }
    }
}

impl fmt::Display for NormalizedPinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_seen_normalizes_to_ok() {
        assert_eq!(RawPinStatus::Seen.normalize(), NormalizedPinStatus::Ok);
        assert_eq!(RawPinStatus::Missing.normalize(), NormalizedPinStatus::Bad);
        assert_eq!(RawPinStatus::Unknown.normalize(), NormalizedPinStatus::Bad);
    }

    #[test]
    fn wire_vocabulary_is_fail_safe() {
        assert_eq!(RawPinStatus::from_wire("seen"), RawPinStatus::Seen);
        assert_eq!(RawPinStatus::from_wire(" SEEN "), RawPinStatus::Seen);
        assert_eq!(RawPinStatus::from_wire("miss"), RawPinStatus::Missing);
        assert_eq!(RawPinStatus::from_wire("unknown"), RawPinStatus::Unknown);
        assert_eq!(RawPinStatus::from_wire("ok"), RawPinStatus::Unknown);
        assert_eq!(RawPinStatus::from_wire(""), RawPinStatus::Unknown);
    }
}
