//! Per-command engine state machine.

use std::fmt;

/// Where the engine is in processing one command.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum EngineState {
    /// Waiting for a command.
    #[default]
    Idle,
    /// Walking dispatch candidates.
    Resolving,
    /// A handler returned a successful result.
    Applied,
    /// The command failed or nobody claimed it.  No turn advance.
    Rejected,
    /// Advancing the turn clock.
    TurnAdvancing,
    /// Running one hook of the execution order.
    PhaseExecuting,
}

impl EngineState {
    /// `true` if `self → next` is a legal transition.
    pub fn permits(self, next: EngineState) -> bool {
        use EngineState::*;
        matches!(
            (self, next),
            (Idle, Resolving)
                | (Resolving, Applied)
                | (Resolving, Rejected)
                | (Rejected, Idle)
                | (Applied, TurnAdvancing)
                | (TurnAdvancing, PhaseExecuting)
                | (TurnAdvancing, Idle)
                | (PhaseExecuting, PhaseExecuting)
                | (PhaseExecuting, Idle)
        )
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Idle           => "idle",
            EngineState::Resolving      => "resolving",
            EngineState::Applied        => "applied",
            EngineState::Rejected       => "rejected",
            EngineState::TurnAdvancing  => "turn_advancing",
            EngineState::PhaseExecuting => "phase_executing",
        };
        f.write_str(name)
    }
}
