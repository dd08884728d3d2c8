//! Randomness source for bracket seeding.

use super::models::Player;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Reorders contestants before they are laid into bracket slots.
///
/// Injected into the pairing generator so tests and operators can pin the
/// exact bracket layout.
pub trait Shuffler: Send {
    fn shuffle(&mut self, players: &mut [Player]);
}

/// Uniform random permutation backed by a seedable RNG.
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    /// Create a shuffler seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible shuffler.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, players: &mut [Player]) {
        players.shuffle(&mut self.rng);
    }
}

/// Keeps contestants in the order given.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&mut self, _players: &mut [Player]) {}
}
