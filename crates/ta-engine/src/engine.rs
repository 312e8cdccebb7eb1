//! The `Engine` struct and its per-command loop.

use ta_behavior::HandlerContext;
use ta_core::{ActionContext, EntityId, EventResult, GameConfig, HandlerResult, Turn, TurnClock};
use ta_registry::Registry;
use ta_world::World;

use crate::{
    Dispatcher, EngineError, EngineResult, EngineState, Invoker, TurnObserver, TurnReport,
    run_phase,
};

/// The game runner.
///
/// Owns the only mutable [`World`] and the frozen [`Registry`].  Handlers see
/// the world as `&mut World`, one at a time, for the duration of a call.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine {
    pub config: GameConfig,
    pub clock:  TurnClock,
    pub world:  World,
    registry:   Registry,
    state:      EngineState,
}

impl Engine {
    pub(crate) fn new(config: GameConfig, world: World, registry: Registry) -> Self {
        Self {
            clock: TurnClock::new(config.start_turn),
            config,
            world,
            registry,
            state: EngineState::Idle,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn turn(&self) -> Turn {
        self.clock.current
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Process one player command end to end.
    ///
    /// A successful command advances the turn and runs every turn phase; a
    /// failed or unclaimed one leaves the clock alone.  A handler error
    /// aborts processing, returns the engine to `Idle`, and is returned as
    /// is.  World changes made before the error are not rolled back.
    pub fn submit<O: TurnObserver>(
        &mut self,
        action:   &ActionContext,
        observer: &mut O,
    ) -> EngineResult<TurnReport> {
        let outcome = self.process(action, observer);
        if outcome.is_err() {
            self.state = EngineState::Idle;
        }
        outcome
    }

    /// Resolve `action` without advancing the turn or running phases.
    pub fn dispatch(&mut self, action: &ActionContext) -> EngineResult<HandlerResult> {
        let ctx = HandlerContext::for_command(self.clock.current, action);
        Dispatcher::new(&self.registry, &self.config.no_action_message)
            .dispatch(&action.verb, &ctx, &mut self.world)
    }

    /// Invoke an entity event (`Some(entity)`, `name` = event name) or a
    /// global hook (`None`, `name` = hook id) outside the turn loop.
    pub fn invoke(
        &mut self,
        entity: Option<EntityId>,
        name:   &str,
        action: &ActionContext,
    ) -> EngineResult<EventResult> {
        let ctx = HandlerContext::new(self.clock.current, action, entity);
        Invoker::new(&self.registry).invoke(entity, name, &ctx, &mut self.world)
    }

    // ── Command processing ────────────────────────────────────────────────

    fn process<O: TurnObserver>(
        &mut self,
        action:   &ActionContext,
        observer: &mut O,
    ) -> EngineResult<TurnReport> {
        // ── Resolve ───────────────────────────────────────────────────────
        self.transition(EngineState::Resolving, observer)?;
        let ctx = HandlerContext::for_command(self.clock.current, action);
        let resolution = Dispatcher::new(&self.registry, &self.config.no_action_message)
            .resolve(&action.verb, &ctx, &mut self.world)?;
        observer.on_command(self.clock.current, &resolution);

        if !resolution.result.success {
            self.transition(EngineState::Rejected, observer)?;
            self.transition(EngineState::Idle, observer)?;
            let report = TurnReport {
                turn:       self.clock.current,
                advanced:   false,
                command:    resolution.result,
                claimed_by: resolution.claimed_by,
                phases:     Vec::new(),
            };
            observer.on_turn_end(&report);
            return Ok(report);
        }

        // ── Advance ───────────────────────────────────────────────────────
        self.transition(EngineState::Applied, observer)?;
        self.transition(EngineState::TurnAdvancing, observer)?;
        let turn = self.clock.advance();
        tracing::info!(%turn, verb = %action.verb, "turn advanced");

        // ── Phases ────────────────────────────────────────────────────────
        let ctx = HandlerContext::new(turn, action, None);
        let invoker = Invoker::new(&self.registry);
        let mut phases = Vec::with_capacity(self.registry.execution_order().len());
        for hook in self.registry.execution_order().iter() {
            transition(&mut self.state, EngineState::PhaseExecuting, observer)?;
            let outcome = run_phase(&invoker, hook, &ctx, &mut self.world)?;
            observer.on_phase(turn, &outcome);
            phases.push(outcome);
        }
        self.transition(EngineState::Idle, observer)?;

        let report = TurnReport {
            turn,
            advanced:   true,
            command:    resolution.result,
            claimed_by: resolution.claimed_by,
            phases,
        };
        observer.on_turn_end(&report);
        Ok(report)
    }

    fn transition<O: TurnObserver>(
        &mut self,
        next: EngineState,
        observer: &mut O,
    ) -> EngineResult<()> {
        transition(&mut self.state, next, observer)
    }
}

/// Field-level form of [`Engine::transition`], usable while the registry is
/// borrowed.
fn transition<O: TurnObserver>(
    state:    &mut EngineState,
    next:     EngineState,
    observer: &mut O,
) -> EngineResult<()> {
    let from = *state;
    if !from.permits(next) {
        return Err(EngineError::IllegalTransition { from, to: next });
    }
    tracing::debug!(%from, to = %next, "engine state");
    observer.on_transition(from, next);
    *state = next;
    Ok(())
}
