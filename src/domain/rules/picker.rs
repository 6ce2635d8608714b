//! Seedable uniform response picker.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

/// Uniform chooser over response lists.
///
/// Wraps a ChaCha8 generator so a fixed seed reproduces the same sequence
/// of picks; shared across concurrent requests behind a mutex.
#[derive(Debug)]
pub struct ResponsePicker {
    rng: Mutex<ChaCha8Rng>,
}

impl Default for ResponsePicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ResponsePicker {
    /// Creates a picker with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Creates a picker seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Creates a picker from an optional configured seed.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }

    /// Picks one item uniformly; `None` only for an empty slice.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        items.choose(&mut *rng)
    }
}
