//! Fluent builder for constructing a [`World`].
//!
//! # Usage
//!
//! ```rust
//! use ta_world::{EntitySpec, WorldBuilder};
//!
//! #[derive(Default)]
//! struct Fuel(u32);
//!
//! let world = WorldBuilder::new(/*seed=*/ 42)
//!     .register_component::<Fuel>()
//!     .entity(EntitySpec::new("hall", "room"))
//!     .entity(EntitySpec::new("lamp", "item").at("hall").behavior("core/light"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(world.entities.len(), 2);
//! ```

use ta_core::{EntityId, GameRng, ModuleId};

use crate::{Component, ComponentMap, EntityStore, World, WorldError, WorldResult};

// ── EntitySpec ────────────────────────────────────────────────────────────────

/// Authoring description of one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySpec {
    pub name:      String,
    pub kind:      String,
    /// Name of the containing entity, resolved when the world is built.
    pub location:  Option<String>,
    /// Behaviors list in precedence order.
    pub behaviors: Vec<ModuleId>,
}

impl EntitySpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name:      name.into(),
            kind:      kind.into(),
            location:  None,
            behaviors: Vec::new(),
        }
    }

    /// Place the entity inside `location` (by name).
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Append a module to the behaviors list.
    pub fn behavior(mut self, module: impl Into<ModuleId>) -> Self {
        self.behaviors.push(module.into());
        self
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`World`].
pub struct WorldBuilder {
    seed:       u64,
    components: ComponentMap,
    specs:      Vec<EntitySpec>,
}

impl WorldBuilder {
    /// Create a builder whose `GameRng` is seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            components: ComponentMap::new(),
            specs:      Vec::new(),
        }
    }

    /// Register a game-defined component type `T`.
    ///
    /// Every entity reads as `T::default()` until a handler writes to it.
    pub fn register_component<T: Component>(mut self) -> Self {
        self.components.register::<T>();
        self
    }

    /// Add one entity.  Ids are assigned in insertion order.
    pub fn entity(mut self, spec: EntitySpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Add many entities, e.g. the output of [`crate::load_entities_csv`].
    pub fn entities(mut self, specs: impl IntoIterator<Item = EntitySpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Check name uniqueness, resolve locations, and return the world.
    pub fn build(self) -> WorldResult<World> {
        let mut store = EntityStore::new(self.components);

        // ── Pass 1: allocate ids ──────────────────────────────────────────
        for spec in &self.specs {
            if store.find(&spec.name).is_some() {
                return Err(WorldError::DuplicateEntity(spec.name.clone()));
            }
            store.push(spec.name.clone(), spec.kind.clone(), spec.behaviors.clone());
        }

        // ── Pass 2: resolve locations (forward references allowed) ────────
        for (i, spec) in self.specs.iter().enumerate() {
            let Some(location) = &spec.location else { continue };
            let target = store.find(location).ok_or_else(|| WorldError::UnknownLocation {
                entity:   spec.name.clone(),
                location: location.clone(),
            })?;
            store.place(EntityId(i as u32), target);
        }

        Ok(World::new(store, GameRng::new(self.seed)))
    }
}
