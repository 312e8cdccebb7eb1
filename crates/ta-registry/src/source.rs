//! Module sources and the table of loaded modules.

use std::collections::BTreeMap;

use ta_behavior::BehaviorModule;
use ta_core::{ModuleId, Tier};

use crate::{LoadError, LoadResult};

// ── ModuleSource ──────────────────────────────────────────────────────────────

/// One place modules come from, with the tier every module in it receives.
///
/// Tier is declared here and nowhere else; it never depends on where a
/// module's code happens to live.
#[derive(Debug)]
pub struct ModuleSource {
    pub name:    String,
    pub tier:    Tier,
    pub modules: Vec<BehaviorModule>,
}

impl ModuleSource {
    pub fn new(name: impl Into<String>, tier: Tier) -> Self {
        Self { name: name.into(), tier, modules: Vec::new() }
    }

    pub fn module(mut self, module: BehaviorModule) -> Self {
        self.modules.push(module);
        self
    }

    pub fn modules(mut self, modules: impl IntoIterator<Item = BehaviorModule>) -> Self {
        self.modules.extend(modules);
        self
    }
}

// ── LoadedModule ──────────────────────────────────────────────────────────────

/// A module after loading: the module itself plus where and when it loaded.
#[derive(Debug)]
pub struct LoadedModule {
    pub module:     BehaviorModule,
    pub tier:       Tier,
    /// Position in overall load order (sources in supply order, then modules
    /// in source order).  The secondary precedence key within a tier.
    pub load_index: usize,
    /// Name of the `ModuleSource` it came from.
    pub source:     String,
}

impl LoadedModule {
    #[inline]
    pub fn id(&self) -> &ModuleId {
        self.module.id()
    }
}

// ── ModuleTable ───────────────────────────────────────────────────────────────

/// Every loaded module, indexed by load order and by id.
#[derive(Debug, Default)]
pub struct ModuleTable {
    modules: Vec<LoadedModule>,
    by_id:   BTreeMap<ModuleId, usize>,
}

impl ModuleTable {
    /// Register `module`.  A name already present is an immediate error.
    pub fn insert(
        &mut self,
        module: BehaviorModule,
        tier: Tier,
        source: &str,
    ) -> LoadResult<usize> {
        if let Some(&existing) = self.by_id.get(module.id()) {
            return Err(LoadError::DuplicateModule {
                module: module.id().clone(),
                first:  self.modules[existing].source.clone(),
                second: source.to_owned(),
            });
        }
        let load_index = self.modules.len();
        self.by_id.insert(module.id().clone(), load_index);
        self.modules.push(LoadedModule {
            module,
            tier,
            load_index,
            source: source.to_owned(),
        });
        Ok(load_index)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, id: &ModuleId) -> Option<&LoadedModule> {
        self.by_id.get(id).map(|&i| &self.modules[i])
    }

    /// The module at `load_index`.
    pub fn at(&self, load_index: usize) -> Option<&LoadedModule> {
        self.modules.get(load_index)
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Every module, in load order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedModule> + '_ {
        self.modules.iter()
    }
}
