//! Structured results of one submitted command.

use ta_core::{EventResult, HandlerResult, HookId, ModuleId, Turn};

/// Result of one hook in the execution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub hook:     HookId,
    /// Handlers bound to the hook that ran.  Zero for an unused extension point.
    pub handlers: usize,
    pub result:   EventResult,
}

/// Everything one command produced, for the narration layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// The turn after processing: the new turn if it advanced, else unchanged.
    pub turn:       Turn,
    pub advanced:   bool,
    pub command:    HandlerResult,
    pub claimed_by: Option<ModuleId>,
    /// One entry per hook in execution order.  Empty if the turn did not advance.
    pub phases:     Vec<PhaseOutcome>,
}

impl TurnReport {
    /// All phase results aggregated into one.
    pub fn combined(&self) -> EventResult {
        EventResult::aggregate(self.phases.iter().map(|p| p.result.clone()))
    }

    /// Phase results in execution order.
    pub fn results(&self) -> impl Iterator<Item = &EventResult> + '_ {
        self.phases.iter().map(|p| &p.result)
    }
}
