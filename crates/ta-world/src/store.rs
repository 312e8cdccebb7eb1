//! Core entity storage: `EntityStore` (SoA data).

use std::collections::BTreeMap;

use ta_core::{EntityId, ModuleId};

use crate::component::{Component, ComponentMap, ComponentTable};

/// Structure-of-Arrays storage for all entities.
///
/// Every per-entity `Vec` has exactly [`len`](Self::len) elements and the
/// `EntityId` value is the index into all of them.  The arrays are private:
/// handlers reach them through the accessors, which cannot change their
/// length.
///
/// Game-defined state lives in sparse [`ComponentTable`]s, reached through
/// [`EntityStore::get`] / [`EntityStore::get_mut`].
pub struct EntityStore {
    /// Unique author-facing name (`"brass_lamp"`).
    names: Vec<String>,

    /// Entity type (`"room"`, `"item"`, `"npc"`, …).  Handlers test this to
    /// decide whether they apply.
    kinds: Vec<String>,

    /// Containing entity (room, container, holder).  `EntityId::INVALID` for
    /// top-level entities such as rooms.
    locations: Vec<EntityId>,

    /// Per-entity ordered behaviors list.  Authoring data only; the engine
    /// reads it but never rewrites it during play.
    behaviors: Vec<Vec<ModuleId>>,

    by_name: BTreeMap<String, EntityId>,

    components: ComponentMap,
}

impl EntityStore {
    /// Number of entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` if there are no entities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `true` if `entity` indexes an existing entity.
    #[inline]
    pub fn contains(&self, entity: EntityId) -> bool {
        entity.index() < self.len()
    }

    /// Iterator over all `EntityId`s in ascending index order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.len() as u32).map(EntityId)
    }

    /// Resolve an entity by its unique name.
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, entity: EntityId) -> Option<&str> {
        self.names.get(entity.index()).map(String::as_str)
    }

    pub fn kind(&self, entity: EntityId) -> Option<&str> {
        self.kinds.get(entity.index()).map(String::as_str)
    }

    /// `true` if `entity` exists and has kind `kind`.
    pub fn is_kind(&self, entity: EntityId, kind: &str) -> bool {
        self.kind(entity) == Some(kind)
    }

    /// Containing entity, or `None` for top-level / unknown entities.
    pub fn location(&self, entity: EntityId) -> Option<EntityId> {
        self.locations
            .get(entity.index())
            .copied()
            .filter(|&loc| loc != EntityId::INVALID)
    }

    /// Move `entity` into `location`.  Returns `false` if either id is unknown.
    pub fn move_to(&mut self, entity: EntityId, location: EntityId) -> bool {
        if !self.contains(entity) || !self.contains(location) {
            return false;
        }
        self.locations[entity.index()] = location;
        true
    }

    /// All entities whose location is `container`, ascending by id.
    pub fn contents(&self, container: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.entity_ids()
            .zip(self.locations.iter())
            .filter(move |&(_, &loc)| loc == container)
            .map(|(e, _)| e)
    }

    /// The ordered behaviors list of `entity`, or `None` if it does not exist.
    pub fn behaviors(&self, entity: EntityId) -> Option<&[ModuleId]> {
        self.behaviors.get(entity.index()).map(Vec::as_slice)
    }

    /// Iterate `(entity, behaviors list)` for every entity.
    pub fn behavior_lists(&self) -> impl Iterator<Item = (EntityId, &[ModuleId])> + '_ {
        self.entity_ids().zip(self.behaviors.iter().map(Vec::as_slice))
    }

    // ── Component access ──────────────────────────────────────────────

    /// The whole table of component `T`, or `None` if `T` was not registered.
    pub fn component<T: Component>(&self) -> Option<&ComponentTable<T>> {
        self.components.table::<T>()
    }

    pub fn component_mut<T: Component>(&mut self) -> Option<&mut ComponentTable<T>> {
        self.components.table_mut::<T>()
    }

    /// One entity's value of component `T` (the default if it has no entry).
    /// `None` if the entity does not exist or `T` was not registered.
    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        if !self.contains(entity) {
            return None;
        }
        Some(self.component::<T>()?.get(entity))
    }

    /// Mutable access to one entity's value of component `T`.
    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        if !self.contains(entity) {
            return None;
        }
        Some(self.component_mut::<T>()?.get_mut(entity))
    }

    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    // ── Package-private constructor used by WorldBuilder ──────────────────

    pub(crate) fn new(components: ComponentMap) -> Self {
        Self {
            names: Vec::new(),
            kinds: Vec::new(),
            locations: Vec::new(),
            behaviors: Vec::new(),
            by_name: BTreeMap::new(),
            components,
        }
    }

    /// Append one entity; the caller has already checked name uniqueness.
    pub(crate) fn push(
        &mut self,
        name:      String,
        kind:      String,
        behaviors: Vec<ModuleId>,
    ) -> EntityId {
        let id = EntityId(self.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        self.kinds.push(kind);
        self.locations.push(EntityId::INVALID);
        self.behaviors.push(behaviors);
        id
    }

    /// Set a location resolved by the builder; both ids are known to exist.
    pub(crate) fn place(&mut self, entity: EntityId, location: EntityId) {
        if let Some(slot) = self.locations.get_mut(entity.index()) {
            *slot = location;
        }
    }
}
