//! `BehaviorModule` — one loadable unit of game logic.

use std::collections::BTreeMap;
use std::fmt;

use ta_core::{EventResult, HookId, ModuleId};
use ta_world::World;

use crate::{
    Applicability, BehaviorError, BehaviorResult, CommandHandler, EventDecl, EventHandler,
    HandlerContext, HookDefinition, Manifest, VerbDecl,
};

// ── BehaviorModule ────────────────────────────────────────────────────────────

/// Declarations plus typed callables, identified by a stable path-like name.
///
/// Immutable once built.  The registry takes ownership at load time and lends
/// out `&BehaviorModule` for the rest of the process.
pub struct BehaviorModule {
    id:       ModuleId,
    manifest: Manifest,
    commands: BTreeMap<String, Box<dyn CommandHandler>>,
    events:   BTreeMap<String, Box<dyn EventHandler>>,
}

impl BehaviorModule {
    /// Start building a module named `id`.
    pub fn builder(id: impl Into<ModuleId>) -> ModuleBuilder {
        ModuleBuilder::new(id)
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn hook_definitions(&self) -> &[HookDefinition] {
        &self.manifest.hook_definitions
    }

    pub fn events(&self) -> &[EventDecl] {
        &self.manifest.events
    }

    pub fn verbs(&self) -> &[VerbDecl] {
        &self.manifest.verbs
    }

    /// The command callable registered under `event`.
    pub fn command_handler(&self, event: &str) -> Option<&dyn CommandHandler> {
        self.commands.get(event).map(|h| &**h)
    }

    /// The event callable registered under `event`.
    pub fn event_handler(&self, event: &str) -> Option<&dyn EventHandler> {
        self.events.get(event).map(|h| &**h)
    }

    /// Names of every registered command callable, in lexical order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.keys().map(String::as_str)
    }

    /// Names of every registered event callable, in lexical order.
    pub fn event_handler_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.keys().map(String::as_str)
    }

    /// `true` if this module declares a binding for `event`.
    pub fn binds(&self, event: &str) -> bool {
        self.manifest.events.iter().any(|e| e.event == event)
    }

    /// Hooks this module's bindings target, in declaration order.
    pub fn bound_hooks(&self) -> impl Iterator<Item = &HookId> + '_ {
        self.manifest.events.iter().map(|e| &e.hook)
    }
}

impl fmt::Debug for BehaviorModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorModule")
            .field("id", &self.id)
            .field("manifest", &self.manifest)
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ── ModuleBuilder ─────────────────────────────────────────────────────────────

/// Fluent builder for [`BehaviorModule`].
///
/// Declarations may come from code ([`hook`](Self::hook), [`bind`](Self::bind),
/// [`verb`](Self::verb)), from a TOML [`Manifest`], or both.  Callables are
/// registered by event name.  Cross-checks between the two (a declared event
/// without a callable and vice versa) are left to the registry's validation
/// pass so every problem of a load is reported together.
///
/// # Example
///
/// ```rust,ignore
/// let lamp = BehaviorModule::builder("game/lamp")
///     .hook(HookDefinition::turn_phase("turn_light_decay").after("turn_npc_moves"))
///     .event("on_light_decay", "turn_light_decay", |_ctx, world| {
///         Ok(EventResult::allow("The lamp dims."))
///     })
///     .command(VerbDecl::new("light", "cmd_light").requires_object(), |ctx, world| {
///         Ok(Applicability::NotApplicable)
///     })
///     .build()?;
/// ```
pub struct ModuleBuilder {
    id:       ModuleId,
    manifest: Manifest,
    commands: BTreeMap<String, Box<dyn CommandHandler>>,
    events:   BTreeMap<String, Box<dyn EventHandler>>,
    errors:   Vec<String>,
}

impl ModuleBuilder {
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id:       id.into(),
            manifest: Manifest::default(),
            commands: BTreeMap::new(),
            events:   BTreeMap::new(),
            errors:   Vec::new(),
        }
    }

    // ── Declarations ──────────────────────────────────────────────────────

    /// Append every declaration of `manifest`.
    pub fn manifest(mut self, manifest: Manifest) -> Self {
        self.manifest.merge(manifest);
        self
    }

    /// Declare a hook.
    pub fn hook(mut self, def: HookDefinition) -> Self {
        self.manifest.hook_definitions.push(def);
        self
    }

    /// Declare an event binding without registering its callable.
    pub fn bind(mut self, decl: EventDecl) -> Self {
        self.manifest.events.push(decl);
        self
    }

    /// Declare a verb without registering its callable.
    pub fn verb(mut self, decl: VerbDecl) -> Self {
        self.manifest.verbs.push(decl);
        self
    }

    // ── Callables ─────────────────────────────────────────────────────────

    /// Register a command callable under `event`.
    pub fn command_handler(
        mut self,
        event: impl Into<String>,
        handler: impl CommandHandler,
    ) -> Self {
        let event = event.into();
        if self.commands.contains_key(&event) || self.events.contains_key(&event) {
            self.errors.push(format!("callable {event:?} registered twice"));
            return self;
        }
        self.commands.insert(event, Box::new(handler));
        self
    }

    /// Register an event callable under `event`.
    pub fn event_handler(mut self, event: impl Into<String>, handler: impl EventHandler) -> Self {
        let event = event.into();
        if self.commands.contains_key(&event) || self.events.contains_key(&event) {
            self.errors.push(format!("callable {event:?} registered twice"));
            return self;
        }
        self.events.insert(event, Box::new(handler));
        self
    }

    /// Closure form of [`command_handler`](Self::command_handler).
    pub fn on_command<F>(self, event: impl Into<String>, f: F) -> Self
    where
        F: Fn(&HandlerContext<'_>, &mut World) -> BehaviorResult<Applicability>
            + Send
            + Sync
            + 'static,
    {
        self.command_handler(event, f)
    }

    /// Closure form of [`event_handler`](Self::event_handler).
    pub fn on_event<F>(self, event: impl Into<String>, f: F) -> Self
    where
        F: Fn(&HandlerContext<'_>, &mut World) -> BehaviorResult<EventResult>
            + Send
            + Sync
            + 'static,
    {
        self.event_handler(event, f)
    }

    // ── Declaration + callable in one step ────────────────────────────────

    /// Declare `decl` and register its callable.
    pub fn command<F>(self, decl: VerbDecl, f: F) -> Self
    where
        F: Fn(&HandlerContext<'_>, &mut World) -> BehaviorResult<Applicability>
            + Send
            + Sync
            + 'static,
    {
        let event = decl.event.clone();
        self.verb(decl).on_command(event, f)
    }

    /// Bind `event` to `hook` and register its callable.
    pub fn event<F>(self, event: impl Into<String>, hook: impl Into<HookId>, f: F) -> Self
    where
        F: Fn(&HandlerContext<'_>, &mut World) -> BehaviorResult<EventResult>
            + Send
            + Sync
            + 'static,
    {
        let event = event.into();
        self.bind(EventDecl::new(event.clone(), hook)).on_event(event, f)
    }

    /// Finish the module.
    ///
    /// Fails only on builder misuse (a callable name registered twice).
    pub fn build(self) -> BehaviorResult<BehaviorModule> {
        if !self.errors.is_empty() {
            return Err(BehaviorError::Config(format!(
                "module {}: {}",
                self.id,
                self.errors.join("; ")
            )));
        }
        Ok(BehaviorModule {
            id:       self.id,
            manifest: self.manifest,
            commands: self.commands,
            events:   self.events,
        })
    }
}
