//! Load-time validation.
//!
//! Runs once, after every module has been collected.  Checks run in a fixed
//! order and every violation is collected before anything is reported:
//!
//! 1. hook id prefix agrees with the declared invocation kind
//! 2. references: ordering targets, binding targets, handler tables
//! 3. entity behaviors lists: loaded modules only, each at most once, no
//!    turn-phase modules
//! 4. the turn-phase ordering graph is acyclic
//!
//! A clean pass yields the `ExecutionOrder`; anything else is one
//! [`ValidationError`] listing all of it.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use thiserror::Error;

use ta_behavior::{InvocationKind, Relation};
use ta_core::{HookId, ModuleId};
use ta_schedule::{Cycle, DependencyGraph, ExecutionOrder, ScheduleError};
use ta_world::EntityStore;

use crate::{HookCatalog, ModuleTable};

// ── Violation ─────────────────────────────────────────────────────────────────

/// One structural problem found in a load.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("hook {hook} (module {module}) is declared {declared} but its id lacks the {expected:?} prefix")]
    KindMismatch {
        hook:     HookId,
        module:   ModuleId,
        declared: InvocationKind,
        expected: &'static str,
    },

    #[error("hook {hook} (module {module}) is ordered {relation} unknown hook {target}")]
    UnknownOrderingTarget {
        hook:     HookId,
        module:   ModuleId,
        relation: Relation,
        target:   HookId,
    },

    #[error("entity hook {hook} (module {module}) declares ordering constraints; only turn-phase hooks are ordered")]
    OrderingOnEntityHook { hook: HookId, module: ModuleId },

    #[error("turn-phase hook {hook} (module {module}) is ordered {relation} entity hook {target}")]
    CrossKindOrdering {
        hook:     HookId,
        module:   ModuleId,
        relation: Relation,
        target:   HookId,
    },

    #[error("module {module} binds event {event:?} to unknown hook {hook}")]
    UnknownBindingHook {
        module: ModuleId,
        event:  String,
        hook:   HookId,
    },

    #[error("module {module} declares {role} {event:?} but registers no {role} callable for it")]
    MissingHandler {
        module: ModuleId,
        event:  String,
        role:   &'static str,
    },

    #[error("module {module} registers {role} callable {event:?} that no declaration uses")]
    UndeclaredHandler {
        module: ModuleId,
        event:  String,
        role:   &'static str,
    },

    #[error("entity {entity:?} lists module {module}, which is not loaded")]
    UnknownEntityModule { entity: String, module: ModuleId },

    #[error("entity {entity:?} lists module {module} more than once")]
    DuplicateEntityModule { entity: String, module: ModuleId },

    #[error("entity {entity:?} lists turn-phase module {module} (binds {hook}); turn phases are global")]
    TurnPhaseModuleOnEntity {
        entity: String,
        module: ModuleId,
        hook:   HookId,
    },

    #[error("dependency cycle: {0}")]
    Cycle(Cycle),
}

// ── ValidationError ───────────────────────────────────────────────────────────

/// Every violation of one load attempt, in check order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", render(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The cycles among the violations.
    pub fn cycles(&self) -> impl Iterator<Item = &Cycle> + '_ {
        self.violations.iter().filter_map(|v| match v {
            Violation::Cycle(c) => Some(c),
            _ => None,
        })
    }
}

fn render(violations: &[Violation]) -> String {
    let mut out = format!("load rejected with {} violation(s):", violations.len());
    for v in violations {
        let _ = write!(out, "\n  - {v}");
    }
    out
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Validate a fully collected load and compute its turn-phase order.
pub fn validate(
    modules:  &ModuleTable,
    catalog:  &HookCatalog,
    entities: &EntityStore,
) -> Result<ExecutionOrder, ValidationError> {
    let mut violations = Vec::new();

    check_kinds(catalog, &mut violations);
    check_ordering_references(catalog, &mut violations);
    check_binding_references(catalog, &mut violations);
    check_handler_tables(modules, &mut violations);
    check_entity_lists(modules, catalog, entities, &mut violations);

    let graph = DependencyGraph::build(catalog.hooks().map(|e| (&e.module, &e.definition)));
    let order = match ExecutionOrder::compute(&graph) {
        Ok(order) => Some(order),
        Err(ScheduleError::Cycle(cycles)) => {
            violations.extend(cycles.into_iter().map(Violation::Cycle));
            None
        }
    };

    match order {
        Some(order) if violations.is_empty() => Ok(order),
        _ => Err(ValidationError { violations }),
    }
}

// ── Checks ────────────────────────────────────────────────────────────────────

fn check_kinds(catalog: &HookCatalog, out: &mut Vec<Violation>) {
    for entry in catalog.hooks().filter(|e| !e.definition.kind_matches_id()) {
        out.push(Violation::KindMismatch {
            hook:     entry.id().clone(),
            module:   entry.module.clone(),
            declared: entry.kind(),
            expected: entry.kind().prefix(),
        });
    }
}

fn check_ordering_references(catalog: &HookCatalog, out: &mut Vec<Violation>) {
    for entry in catalog.hooks() {
        let def = &entry.definition;
        if def.invocation_kind == InvocationKind::Entity && def.constraints().next().is_some() {
            out.push(Violation::OrderingOnEntityHook {
                hook:   entry.id().clone(),
                module: entry.module.clone(),
            });
        }
        for (relation, target) in def.constraints() {
            match catalog.lookup_hook(target) {
                None => out.push(Violation::UnknownOrderingTarget {
                    hook:     entry.id().clone(),
                    module:   entry.module.clone(),
                    relation,
                    target:   target.clone(),
                }),
                Some(t)
                    if def.invocation_kind == InvocationKind::TurnPhase
                        && t.kind() == InvocationKind::Entity =>
                {
                    out.push(Violation::CrossKindOrdering {
                        hook:     entry.id().clone(),
                        module:   entry.module.clone(),
                        relation,
                        target:   target.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }
}

fn check_binding_references(catalog: &HookCatalog, out: &mut Vec<Violation>) {
    for binding in catalog.bindings() {
        if catalog.lookup_hook(&binding.hook_id).is_none() {
            out.push(Violation::UnknownBindingHook {
                module: binding.module.clone(),
                event:  binding.event_name.clone(),
                hook:   binding.hook_id.clone(),
            });
        }
    }
}

fn check_handler_tables(modules: &ModuleTable, out: &mut Vec<Violation>) {
    for loaded in modules.iter() {
        let m = &loaded.module;

        for decl in m.events() {
            if m.event_handler(&decl.event).is_none() {
                out.push(Violation::MissingHandler {
                    module: m.id().clone(),
                    event:  decl.event.clone(),
                    role:   "event",
                });
            }
        }
        for decl in m.verbs() {
            if m.command_handler(&decl.event).is_none() {
                out.push(Violation::MissingHandler {
                    module: m.id().clone(),
                    event:  decl.event.clone(),
                    role:   "command",
                });
            }
        }

        for name in m.command_names() {
            if !m.verbs().iter().any(|v| v.event == name) {
                out.push(Violation::UndeclaredHandler {
                    module: m.id().clone(),
                    event:  name.to_owned(),
                    role:   "command",
                });
            }
        }
        for name in m.event_handler_names() {
            if !m.binds(name) {
                out.push(Violation::UndeclaredHandler {
                    module: m.id().clone(),
                    event:  name.to_owned(),
                    role:   "event",
                });
            }
        }
    }
}

fn check_entity_lists(
    modules:  &ModuleTable,
    catalog:  &HookCatalog,
    entities: &EntityStore,
    out:      &mut Vec<Violation>,
) {
    for (entity, list) in entities.behavior_lists() {
        let name = entities.name(entity).unwrap_or_default();
        let mut seen = BTreeSet::new();
        for module in list {
            if !seen.insert(module) {
                out.push(Violation::DuplicateEntityModule {
                    entity: name.to_owned(),
                    module: module.clone(),
                });
            } else if !modules.contains(module) {
                out.push(Violation::UnknownEntityModule {
                    entity: name.to_owned(),
                    module: module.clone(),
                });
            } else if let Some(binding) = catalog.turn_phase_bindings_of(module).next() {
                out.push(Violation::TurnPhaseModuleOnEntity {
                    entity: name.to_owned(),
                    module: module.clone(),
                    hook:   binding.hook_id.clone(),
                });
            }
        }
    }
}
