//! Built-in connector pinouts.

use crate::error::CatalogError;
use tester_core::Pinout;

/// Key of the generic whole-harness pinout.
pub const BENCH_KEY: &str = "bench";

/// Pinouts selectable on the home screen, in display order.
#[derive(Debug, Clone, Default)]
pub struct PinoutCatalog {
    pinouts: Vec<Pinout>,
}

impl PinoutCatalog {
    /// Catalog in the given order. Keys must be unique.
    pub fn new(pinouts: impl IntoIterator<Item = Pinout>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for pinout in pinouts {
            catalog.insert(pinout)?;
        }
        Ok(catalog)
    }

    /// RJ45, XLR3 and XLR5, plus a bench pinout sweeping pins
    /// `1..=bench_pins`.
    pub fn builtin(bench_pins: usize) -> Result<Self, CatalogError> {
        Self::new([
            Pinout::numbered("rj45", "RJ45 (8P8C)", 8)?,
            Pinout::numbered("xlr3", "XLR 3 (Audio / DMX)", 3)?,
            Pinout::numbered("xlr5", "XLR 5 (DMX)", 5)?,
            Pinout::numbered(BENCH_KEY, format!("Bench ({bench_pins} pins)"), bench_pins)?,
        ])
    }

    /// Append `pinout`, rejecting a key that is already present.
    pub fn insert(&mut self, pinout: Pinout) -> Result<(), CatalogError> {
        if self.get(pinout.key()).is_some() {
            return Err(CatalogError::DuplicateKey(pinout.key().to_string()));
        }
        self.pinouts.push(pinout);
        Ok(())
    }

    /// Pinout with this key.
    pub fn get(&self, key: &str) -> Option<&Pinout> {
        self.pinouts.iter().find(|p| p.key() == key)
    }

    /// Pinouts in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Pinout> {
        self.pinouts.iter()
    }

    /// Number of pinouts.
    pub fn len(&self) -> usize {
        self.pinouts.len()
    }

    /// Whether the catalog has no pinouts.
    pub fn is_empty(&self) -> bool {
        self.pinouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pinouts() {
        let catalog = PinoutCatalog::builtin(32).unwrap();
        assert_eq!(catalog.len(), 4);

        let rj45 = catalog.get("rj45").unwrap();
        assert_eq!(rj45.title(), "RJ45 (8P8C)");
        assert_eq!(rj45.pin_count(), 8);
        assert_eq!(catalog.get("xlr3").unwrap().pin_count(), 3);
        assert_eq!(catalog.get("xlr5").unwrap().pin_count(), 5);
        assert_eq!(catalog.get(BENCH_KEY).unwrap().pin_count(), 32);
        assert!(catalog.get("db9").is_none());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut catalog = PinoutCatalog::builtin(4).unwrap();
        let err = catalog
            .insert(Pinout::numbered("xlr3", "Another XLR", 3).unwrap())
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKey("xlr3".to_string()));
    }
}
