//! The mutable game state handed to handlers.

use ta_core::GameRng;

use crate::EntityStore;

/// Everything handlers are allowed to mutate.
///
/// The engine holds the only `World` and lends it out as `&mut World` to one
/// handler at a time, so single-writer access is enforced by the borrow
/// checker rather than by convention.
pub struct World {
    pub entities: EntityStore,
    pub rng:      GameRng,
}

impl World {
    pub fn new(entities: EntityStore, rng: GameRng) -> Self {
        Self { entities, rng }
    }
}
