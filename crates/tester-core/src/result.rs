//! Test verdicts and the raw → normalized reduction.

use crate::pin::{PinId, PinMap};
use crate::status::{NormalizedPinStatus, RawPinStatus};

/// Outcome of one continuity test.
///
/// Produced by [`aggregate`]; immutable afterwards. The key set of
/// `per_pin` is exactly the set of pins the test was launched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub per_pin: PinMap<NormalizedPinStatus>,
    pub passed: bool,
}

impl TestResult {
    /// "PASS" or "FAIL" for the status line.
    pub fn status_line(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }

    pub fn ok_count(&self) -> usize {
        self.per_pin.values().filter(|s| s.is_ok()).count()
    }

    pub fn bad_count(&self) -> usize {
        self.per_pin.len() - self.ok_count()
    }

    pub fn bad_pins(&self) -> impl Iterator<Item = &PinId> {
        self.per_pin
            .iter()
            .filter(|(_, s)| !s.is_ok())
            .map(|(p, _)| p)
    }
}

/// Reduce raw backend readings into a [`TestResult`].
///
/// Seen becomes Ok, Missing and Unknown become Bad. `passed` is the AND over
/// all pins, so an empty reading passes.
pub fn aggregate(raw: &PinMap<RawPinStatus>) -> TestResult {
    let per_pin = raw.map_values(|status| status.normalize());
    let passed = per_pin.values().all(NormalizedPinStatus::is_ok);
    TestResult { per_pin, passed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, RawPinStatus)]) -> PinMap<RawPinStatus> {
        entries
            .iter()
            .map(|(p, s)| (PinId::from(*p), *s))
            .collect()
    }

    #[test]
    fn empty_input_passes() {
        let result = aggregate(&PinMap::new());
        assert!(result.passed);
        assert!(result.per_pin.is_empty());
        assert_eq!(result.status_line(), "PASS");
    }

    #[test]
    fn missing_pin_fails_the_test() {
        let result = aggregate(&raw(&[
            ("1", RawPinStatus::Seen),
            ("2", RawPinStatus::Missing),
        ]));

        assert!(!result.passed);
        assert_eq!(result.per_pin.get("1"), Some(&NormalizedPinStatus::Ok));
        assert_eq!(result.per_pin.get("2"), Some(&NormalizedPinStatus::Bad));
        assert_eq!(result.status_line(), "FAIL");
    }

    #[test]
    fn unknown_counts_as_bad() {
        let result = aggregate(&raw(&[
            ("1", RawPinStatus::Seen),
            ("2", RawPinStatus::Unknown),
            ("3", RawPinStatus::Seen),
        ]));

        assert!(!result.passed);
        assert_eq!(result.ok_count(), 2);
        assert_eq!(result.bad_count(), 1);
        let bad: Vec<&str> = result.bad_pins().map(PinId::as_str).collect();
        assert_eq!(bad, vec!["2"]);
    }

    #[test]
    fn all_seen_passes_and_keeps_order() {
        let result = aggregate(&raw(&[
            ("3", RawPinStatus::Seen),
            ("1", RawPinStatus::Seen),
        ]));
        assert!(result.passed);
        let keys: Vec<&str> = result.per_pin.keys().map(PinId::as_str).collect();
        assert_eq!(keys, vec!["3", "1"]);
    }
}
