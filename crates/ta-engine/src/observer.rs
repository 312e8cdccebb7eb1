//! Engine observer trait for narration, logging, and tests.

use ta_core::Turn;

use crate::{EngineState, PhaseOutcome, Resolution, TurnReport};

/// Callbacks invoked by [`Engine::submit`][crate::Engine::submit].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — transcript printer
///
/// ```rust,ignore
/// struct Transcript;
///
/// impl TurnObserver for Transcript {
///     fn on_turn_end(&mut self, report: &TurnReport) {
///         println!("{}: {}", report.turn, report.command.message);
///     }
/// }
/// ```
pub trait TurnObserver {
    /// Called on every state change, including each `PhaseExecuting` step.
    fn on_transition(&mut self, _from: EngineState, _to: EngineState) {}

    /// Called once the command is resolved, before the turn advances.
    fn on_command(&mut self, _turn: Turn, _resolution: &Resolution) {}

    /// Called after each hook of the execution order has run.
    fn on_phase(&mut self, _turn: Turn, _outcome: &PhaseOutcome) {}

    /// Called last, with the complete report.
    fn on_turn_end(&mut self, _report: &TurnReport) {}
}

/// A [`TurnObserver`] that does nothing.
pub struct NoopObserver;

impl TurnObserver for NoopObserver {}
