//! The load entry point.

use ta_world::EntityStore;

use crate::{
    EventBinding, HookCatalog, LoadResult, ModuleSource, ModuleTable, Registry, VerbTable, validate,
};

/// Collects module sources, then loads them in one two-phase pass.
///
/// # Example
///
/// ```rust,ignore
/// let registry = Loader::new()
///     .source(ModuleSource::new("game", Tier::GAME).module(lamp))
///     .source(ModuleSource::new("core", Tier::CORE).modules(core_modules()))
///     .load(&world.entities)?;
/// ```
#[derive(Debug, Default)]
pub struct Loader {
    sources: Vec<ModuleSource>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source.  Supply order is load order.
    pub fn source(mut self, source: ModuleSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(mut self, sources: impl IntoIterator<Item = ModuleSource>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Collect every declaration, validate the whole set against `entities`,
    /// and compute the turn-phase order.
    ///
    /// A duplicate module name or hook id fails immediately; everything else
    /// is reported together as [`LoadError::Validation`](crate::LoadError::Validation).
    pub fn load(self, entities: &EntityStore) -> LoadResult<Registry> {
        let mut modules = ModuleTable::default();
        let mut catalog = HookCatalog::new();
        let mut verbs = VerbTable::new();

        // ── Phase 1: collect ──────────────────────────────────────────────
        for source in self.sources {
            let ModuleSource { name, tier, modules: source_modules } = source;
            for module in source_modules {
                let load_index = modules.insert(module, tier, &name)?;
                let Some(loaded) = modules.at(load_index) else { continue };
                let m = &loaded.module;

                for def in m.hook_definitions() {
                    catalog.register_hook(m.id(), def.clone())?;
                }
                for decl in m.events() {
                    catalog.register_event_binding(EventBinding {
                        module:     m.id().clone(),
                        event_name: decl.event.clone(),
                        hook_id:    decl.hook.clone(),
                    });
                }
                for decl in m.verbs() {
                    verbs.declare(load_index, tier, decl);
                }

                tracing::debug!(
                    module = %m.id(),
                    source = %name,
                    %tier,
                    hooks = m.hook_definitions().len(),
                    events = m.events().len(),
                    verbs = m.verbs().len(),
                    "collected behavior module"
                );
            }
        }
        verbs.finish();

        // ── Phase 2: validate + schedule ──────────────────────────────────
        let order = validate(&modules, &catalog, entities)?;

        tracing::info!(
            modules = modules.len(),
            hooks = catalog.hook_count(),
            bindings = catalog.binding_count(),
            words = verbs.len(),
            phases = order.len(),
            "behavior modules loaded"
        );

        Ok(Registry::new(modules, catalog, verbs, order))
    }
}
