//! Pin identifiers, pinouts and the ordered per-pin map.

use crate::error::PinoutError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single connector pin, unique within a [`Pinout`].
///
/// Pin identifiers are opaque strings ("1", "2", "shield", ...). Numeric
/// identifiers additionally carry an [ordinal](PinId::ordinal), which the
/// multiplexer backend uses for channel addressing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(String);

impl PinId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 1-based numeric ordinal, if the identifier is a positive integer.
    pub fn ordinal(&self) -> Option<usize> {
        self.0.trim().parse::<usize>().ok().filter(|n| *n >= 1)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PinId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PinId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<usize> for PinId {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for PinId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Pinout
// =============================================================================

/// A named connector layout with an ordered set of pins.
///
/// Pinouts are built once at startup and shared read-only afterwards, so all
/// fields are private and there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pinout {
    key: String,
    title: String,
    pins: Vec<PinId>,
}

impl Pinout {
    /// Create a pinout, rejecting empty keys and duplicated pins.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        pins: impl IntoIterator<Item = PinId>,
    ) -> Result<Self, PinoutError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(PinoutError::EmptyKey);
        }

        let mut unique: Vec<PinId> = Vec::new();
        for pin in pins {
            if unique.contains(&pin) {
                return Err(PinoutError::DuplicatePin {
                    key,
                    pin: pin.to_string(),
                });
            }
            unique.push(pin);
        }

        Ok(Self {
            key,
            title: title.into(),
            pins: unique,
        })
    }

    /// Pinout with pins labelled `1..=count`.
    pub fn numbered(
        key: impl Into<String>,
        title: impl Into<String>,
        count: usize,
    ) -> Result<Self, PinoutError> {
        Self::new(key, title, (1..=count).map(PinId::from))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }
}

// =============================================================================
// PinMap
// =============================================================================

/// Insertion-ordered mapping from [`PinId`] to `T`.
///
/// Results are displayed in pinout order, so a hash map is not a good fit.
/// Pinouts hold a few dozen pins at most; lookups are linear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinMap<T> {
    entries: Vec<(PinId, T)>,
}

impl<T> PinMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace the value for `pin`, returning the previous value.
    ///
    /// Replacing keeps the pin at its original position.
    pub fn insert(&mut self, pin: PinId, value: T) -> Option<T> {
        match self.entries.iter_mut().find(|(p, _)| *p == pin) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((pin, value));
                None
            }
        }
    }

    pub fn get(&self, pin: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(p, _)| p.as_str() == pin)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, pin: &str) -> bool {
        self.get(pin).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PinId, &T)> {
        self.entries.iter().map(|(p, v)| (p, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &PinId> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Apply `f` to every value, keeping keys and order.
    pub fn map_values<U>(&self, mut f: impl FnMut(&T) -> U) -> PinMap<U> {
        PinMap {
            entries: self.entries.iter().map(|(p, v)| (p.clone(), f(v))).collect(),
        }
    }

    /// True if the key set equals `pins` exactly (membership and cardinality).
    pub fn covers_exactly(&self, pins: &[PinId]) -> bool {
        self.len() == pins.len() && pins.iter().all(|p| self.contains(p.as_str()))
    }
}

impl<T: Clone> PinMap<T> {
    /// Map every pin in `pins` to the same value.
    pub fn filled(pins: &[PinId], value: T) -> Self {
        pins.iter().map(|p| (p.clone(), value.clone())).collect()
    }
}

impl<T> Default for PinMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(PinId, T)> for PinMap<T> {
    fn from_iter<I: IntoIterator<Item = (PinId, T)>>(iter: I) -> Self {
        let mut map = PinMap::new();
        for (pin, value) in iter {
            map.insert(pin, value);
        }
        map
    }
}

impl<T> IntoIterator for PinMap<T> {
    type Item = (PinId, T);
    type IntoIter = std::vec::IntoIter<(PinId, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
