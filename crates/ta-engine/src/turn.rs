//! Turn-phase execution.

use ta_behavior::HandlerContext;
use ta_core::HookId;
use ta_registry::Registry;
use ta_world::World;

use crate::{EngineResult, Invoker, PhaseOutcome};

/// Run every handler bound to `hook` globally.
pub fn run_phase(
    invoker: &Invoker<'_>,
    hook:    &HookId,
    ctx:     &HandlerContext<'_>,
    world:   &mut World,
) -> EngineResult<PhaseOutcome> {
    let invocation = invoker.invoke_hook(hook, ctx, world)?;
    tracing::debug!(
        %hook,
        handlers = invocation.handlers,
        allow = invocation.result.allow,
        "phase executed"
    );
    Ok(PhaseOutcome {
        hook:     hook.clone(),
        handlers: invocation.handlers,
        result:   invocation.result,
    })
}

/// Run the registry's whole execution order once, stopping at the first
/// handler error.
pub fn run_turn(
    registry: &Registry,
    ctx:      &HandlerContext<'_>,
    world:    &mut World,
) -> EngineResult<Vec<PhaseOutcome>> {
    let invoker = Invoker::new(registry);
    registry
        .execution_order()
        .iter()
        .map(|hook| run_phase(&invoker, hook, ctx, world))
        .collect()
}
