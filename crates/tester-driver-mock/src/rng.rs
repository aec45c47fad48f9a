//! Seeded RNG wrapper for reproducible readings.
//!
//! The mock backend draws one value per pin. Tests inject a fixed seed so a
//! sweep is reproducible; production uses OS entropy.

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Thread-safe, optionally seeded random source.
pub struct MockRng {
    inner: Mutex<ChaCha8Rng>,
    seed: Option<u64>,
}

impl MockRng {
    /// Create a new RNG with optional seed.
    /// If seed is None, uses a random seed from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            inner: Mutex::new(rng),
            seed,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Seed this generator was created with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate a random f64 value in the range [0.0, 1.0)
    pub fn next_f64(&self) -> f64 {
        self.inner.lock().gen()
    }
}

impl Default for MockRng {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for MockRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRng")
            .field("seed", &self.seed)
            .field("inner", &"<Mutex<ChaCha8Rng>>")
            .finish()
    }
}
