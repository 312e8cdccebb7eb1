//! The hook/event catalog.
//!
//! A pure in-memory index built from module declarations.  Registration
//! enforces only hook-id uniqueness; every other rule is checked by the
//! validation pass so that all problems of one load surface together.

use std::collections::BTreeMap;

use ta_behavior::{HookDefinition, InvocationKind};
use ta_core::{HookId, ModuleId};

use crate::{LoadError, LoadResult};

/// A registered hook and the module that defined it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookEntry {
    pub definition: HookDefinition,
    pub module:     ModuleId,
}

impl HookEntry {
    #[inline]
    pub fn id(&self) -> &HookId {
        &self.definition.hook_id
    }

    #[inline]
    pub fn kind(&self) -> InvocationKind {
        self.definition.invocation_kind
    }
}

/// Connects the callable `event_name` of `module` to `hook_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventBinding {
    pub module:     ModuleId,
    pub event_name: String,
    pub hook_id:    HookId,
}

#[derive(Debug, Default)]
pub struct HookCatalog {
    hooks:    Vec<HookEntry>,
    by_id:    BTreeMap<HookId, usize>,
    bindings: Vec<EventBinding>,
    /// Binding indices per hook id, in registration order.  Keyed by the
    /// binding's target, whether or not that hook was ever registered.
    by_hook:  BTreeMap<HookId, Vec<usize>>,
}

impl HookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def` as defined by `module`.
    pub fn register_hook(&mut self, module: &ModuleId, def: HookDefinition) -> LoadResult<()> {
        if let Some(&existing) = self.by_id.get(&def.hook_id) {
            return Err(LoadError::DuplicateHook {
                hook:   def.hook_id,
                first:  self.hooks[existing].module.clone(),
                second: module.clone(),
            });
        }
        self.by_id.insert(def.hook_id.clone(), self.hooks.len());
        self.hooks.push(HookEntry { definition: def, module: module.clone() });
        Ok(())
    }

    /// Record a binding.  The target hook need not be registered yet.
    pub fn register_event_binding(&mut self, binding: EventBinding) {
        self.by_hook
            .entry(binding.hook_id.clone())
            .or_default()
            .push(self.bindings.len());
        self.bindings.push(binding);
    }

    pub fn lookup_hook(&self, id: &HookId) -> Option<&HookEntry> {
        self.by_id.get(id).map(|&i| &self.hooks[i])
    }

    /// Every binding targeting `id`, in registration order.
    pub fn bindings_for_hook(&self, id: &HookId) -> impl Iterator<Item = &EventBinding> + '_ {
        self.by_hook
            .get(id)
            .into_iter()
            .flatten()
            .map(|&i| &self.bindings[i])
    }

    /// Every hook, in registration order.
    pub fn hooks(&self) -> impl Iterator<Item = &HookEntry> + '_ {
        self.hooks.iter()
    }

    /// Every binding, in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &EventBinding> + '_ {
        self.bindings.iter()
    }

    /// Bindings of `module` whose target is a registered turn-phase hook.
    ///
    /// A module with at least one such binding is a *turn-phase module*: its
    /// handlers run globally and it may not appear in an entity's behaviors list.
    pub fn turn_phase_bindings_of<'a>(
        &'a self,
        module: &'a ModuleId,
    ) -> impl Iterator<Item = &'a EventBinding> + 'a {
        self.bindings.iter().filter(move |b| {
            &b.module == module
                && self
                    .lookup_hook(&b.hook_id)
                    .is_some_and(|h| h.kind() == InvocationKind::TurnPhase)
        })
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}
