//! Game-defined entity state.
//!
//! Most entities in an adventure carry no game state at all: one lamp has
//! fuel, two doors have locks, and the other hundred things in the world are
//! scenery.  Components are therefore sparse.  Each registered type `T` gets a
//! [`ComponentTable<T>`] mapping `EntityId → T`, and an entity without an entry
//! reads as `T::default()`.  The first mutable access writes the entry.
//!
//! ```rust
//! use ta_core::EntityId;
//! use ta_world::ComponentMap;
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Lit(bool);
//!
//! let mut map = ComponentMap::new();
//! map.register::<Lit>();
//! let table = map.table_mut::<Lit>().unwrap();
//! *table.get_mut(EntityId(4)) = Lit(true);
//! assert_eq!(table.get(EntityId(4)), &Lit(true));
//! assert_eq!(table.get(EntityId(0)), &Lit(false));
//! assert_eq!(table.len(), 1);
//! ```

use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use ta_core::EntityId;

/// Bounds every component type must meet.
pub trait Component: Default + Send + Sync + 'static {}

impl<T: Default + Send + Sync + 'static> Component for T {}

// ── ComponentTable ────────────────────────────────────────────────────────────

/// Values of one component type, keyed by entity.
pub struct ComponentTable<T: Component> {
    entries: BTreeMap<EntityId, T>,
    absent:  T,
}

impl<T: Component> Default for ComponentTable<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new(), absent: T::default() }
    }
}

impl<T: Component> ComponentTable<T> {
    /// The entity's value, or the default if it has none.
    pub fn get(&self, entity: EntityId) -> &T {
        self.entries.get(&entity).unwrap_or(&self.absent)
    }

    /// Mutable value, inserting the default first if the entity has none.
    pub fn get_mut(&mut self, entity: EntityId) -> &mut T {
        self.entries.entry(entity).or_default()
    }

    /// Replace the entity's value, returning the previous explicit one.
    pub fn insert(&mut self, entity: EntityId, value: T) -> Option<T> {
        self.entries.insert(entity, value)
    }

    /// Drop the entity's entry so it reads as the default again.
    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        self.entries.remove(&entity)
    }

    /// `true` if the entity has an explicit entry.
    pub fn has(&self, entity: EntityId) -> bool {
        self.entries.contains_key(&entity)
    }

    /// Entities with an explicit entry, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.entries.iter().map(|(&e, v)| (e, v))
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── ComponentMap ──────────────────────────────────────────────────────────────

/// Every registered component table, keyed by type.
///
/// Behavior modules use components for whatever the engine does not model
/// itself: a lamp's fuel, a door's lock state, a troll's mood.
#[derive(Default)]
pub struct ComponentMap {
    tables: BTreeMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register component type `T`.  Registering it again keeps its entries.
    pub fn register<T: Component>(&mut self) {
        self.tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentTable::<T>::default()));
    }

    pub fn table<T: Component>(&self) -> Option<&ComponentTable<T>> {
        self.tables.get(&TypeId::of::<T>())?.downcast_ref()
    }

    pub fn table_mut<T: Component>(&mut self) -> Option<&mut ComponentTable<T>> {
        self.tables.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// `true` if component `T` has been registered.
    pub fn contains<T: Component>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<T>())
    }

    /// Number of distinct component types registered.
    pub fn type_count(&self) -> usize {
        self.tables.len()
    }
}
