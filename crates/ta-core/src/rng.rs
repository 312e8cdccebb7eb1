//! Seeded randomness for handlers.
//!
//! The world owns one `GameRng` seeded from `GameConfig::seed`.  Handlers run
//! one at a time in an order fixed at load, so the draws a game makes depend
//! only on the seed, the loaded modules and the commands submitted.
//!
//! A handler that wants randomness private to one entity (a flickering lamp,
//! a wandering troll) takes [`GameRng::for_entity`].  That stream is derived
//! from the seed and the entity id alone: it never advances the shared
//! stream, and other handlers drawing more or fewer numbers cannot shift it.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::EntityId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic RNG lent to handlers through the world.
pub struct GameRng {
    seed:  u64,
    draws: u64,
    inner: SmallRng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draws: 0,
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed this stream started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Fresh stream owned by `entity`, independent of this one's position.
    pub fn for_entity(&self, entity: EntityId) -> GameRng {
        let offset = (entity.index() as u64).wrapping_add(1);
        GameRng::new(self.seed ^ offset.wrapping_mul(MIXING_CONSTANT))
    }

    /// Uniform value in `0..n`; `0` when `n == 0`.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.draws += 1;
        self.inner.gen_range(0..n)
    }

    /// `true` with a `chance` in 100.  `0` never happens, `100` or more
    /// always does, and neither extreme consumes a draw.
    pub fn percent(&mut self, chance: u32) -> bool {
        match chance {
            0 => false,
            100.. => true,
            _ => self.below(100) < chance,
        }
    }

    /// Total of `count` dice with `sides` faces each.
    pub fn roll(&mut self, count: u32, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (0..count).map(|_| self.below(sides) + 1).sum()
    }

    /// One element of `options`, or `None` if it is empty.
    pub fn pick<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        if options.is_empty() {
            return None;
        }
        self.draws += 1;
        options.choose(&mut self.inner)
    }
}

impl std::fmt::Debug for GameRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRng")
            .field("seed", &self.seed)
            .field("draws", &self.draws)
            .finish()
    }
}
