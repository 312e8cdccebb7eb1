//! The owned result of a successful load.

use ta_behavior::BehaviorModule;
use ta_core::{HookId, ModuleId};
use ta_schedule::ExecutionOrder;

use crate::{
    EventBinding, HookCatalog, HookEntry, LoadedModule, ModuleTable, VerbCandidate, VerbInfo,
    VerbTable,
};

/// Everything the engine needs to dispatch and schedule, frozen at load.
///
/// There is no way to mutate a `Registry` after [`Loader::load`](crate::Loader::load)
/// returns it, so once a load has succeeded no structural error can occur
/// again.  Share it by reference.
#[derive(Debug)]
pub struct Registry {
    modules: ModuleTable,
    catalog: HookCatalog,
    verbs:   VerbTable,
    order:   ExecutionOrder,
}

impl Registry {
    pub(crate) fn new(
        modules: ModuleTable,
        catalog: HookCatalog,
        verbs:   VerbTable,
        order:   ExecutionOrder,
    ) -> Self {
        Self { modules, catalog, verbs, order }
    }

    // ── Modules ───────────────────────────────────────────────────────────

    pub fn modules(&self) -> &ModuleTable {
        &self.modules
    }

    pub fn module(&self, id: &ModuleId) -> Option<&LoadedModule> {
        self.modules.get(id)
    }

    /// The module at `load_index`.
    pub fn module_at(&self, load_index: usize) -> Option<&LoadedModule> {
        self.modules.at(load_index)
    }

    /// `true` if `id` binds at least one event to a turn-phase hook.
    pub fn is_turn_phase_module(&self, id: &ModuleId) -> bool {
        self.catalog.turn_phase_bindings_of(id).next().is_some()
    }

    // ── Hooks ─────────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &HookCatalog {
        &self.catalog
    }

    pub fn hook(&self, id: &HookId) -> Option<&HookEntry> {
        self.catalog.lookup_hook(id)
    }

    pub fn bindings_for_hook(&self, id: &HookId) -> impl Iterator<Item = &EventBinding> + '_ {
        self.catalog.bindings_for_hook(id)
    }

    /// Modules bound to `hook` with their bound event names, in registration
    /// order.  The global fan-in set for a turn phase.
    pub fn bound_modules(
        &self,
        hook: &HookId,
    ) -> impl Iterator<Item = (&BehaviorModule, &str)> + '_ {
        self.catalog.bindings_for_hook(hook).filter_map(|b| {
            self.modules
                .get(&b.module)
                .map(|m| (&m.module, b.event_name.as_str()))
        })
    }

    /// Turn-phase hooks in execution order.
    pub fn execution_order(&self) -> &ExecutionOrder {
        &self.order
    }

    // ── Vocabulary ────────────────────────────────────────────────────────

    pub fn verbs(&self) -> &VerbTable {
        &self.verbs
    }

    /// Dispatch candidates for `word`, tier 1 first, then load order.
    pub fn candidates(&self, word: &str) -> &[VerbCandidate] {
        self.verbs.candidates(word)
    }

    /// Canonical word and object requirement for `word`, for the parser layer.
    pub fn verb(&self, word: &str) -> Option<VerbInfo<'_>> {
        self.verbs.info(word)
    }
}
