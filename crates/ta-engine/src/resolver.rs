//! Dispatch Resolver: tiered command dispatch with fall-through.

use ta_behavior::{Applicability, HandlerContext};
use ta_core::{HandlerResult, ModuleId};
use ta_registry::Registry;
use ta_world::World;

use crate::{EngineError, EngineResult};

/// How a verb was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Always definitive.  A verb nobody claims yields a failure carrying the
    /// configured "no such action" message.
    pub result:     HandlerResult,
    /// Module whose handler returned `Applicable`, if any.
    pub claimed_by: Option<ModuleId>,
    /// Modules asked before that, in the order they declined.
    pub declined:   Vec<ModuleId>,
}

/// Walks the verb table of a [`Registry`].
///
/// Candidates are tried in `(tier, load order)` order.  The first handler to
/// answer `Applicable` ends the walk; lower-precedence candidates are never
/// invoked.  `NotApplicable` moves on to the next candidate.
#[derive(Clone, Copy, Debug)]
pub struct Dispatcher<'r> {
    registry:          &'r Registry,
    no_action_message: &'r str,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry, no_action_message: &'r str) -> Self {
        Self { registry, no_action_message }
    }

    /// Resolve `verb` to a definitive result.
    pub fn dispatch(
        &self,
        verb:  &str,
        ctx:   &HandlerContext<'_>,
        world: &mut World,
    ) -> EngineResult<HandlerResult> {
        Ok(self.resolve(verb, ctx, world)?.result)
    }

    /// Like [`dispatch`](Self::dispatch), also reporting who claimed the verb
    /// and who declined it.
    pub fn resolve(
        &self,
        verb:  &str,
        ctx:   &HandlerContext<'_>,
        world: &mut World,
    ) -> EngineResult<Resolution> {
        let mut declined = Vec::new();

        for candidate in self.registry.candidates(verb) {
            let Some(loaded) = self.registry.module_at(candidate.module) else { continue };
            let Some(handler) = loaded.module.command_handler(&candidate.event) else { continue };

            let answer = handler
                .handle(ctx, world)
                .map_err(|e| EngineError::handler(loaded.id(), &candidate.event, e))?;

            match answer {
                Applicability::Applicable(result) => {
                    tracing::debug!(
                        verb,
                        module = %loaded.id(),
                        tier = %candidate.tier,
                        success = result.success,
                        "command claimed"
                    );
                    return Ok(Resolution {
                        result,
                        claimed_by: Some(loaded.id().clone()),
                        declined,
                    });
                }
                Applicability::NotApplicable => {
                    tracing::debug!(verb, module = %loaded.id(), "candidate declined");
                    declined.push(loaded.id().clone());
                }
            }
        }

        tracing::debug!(verb, declined = declined.len(), "no handler claimed the verb");
        Ok(Resolution {
            result: HandlerResult::failure(self.no_action_message),
            claimed_by: None,
            declined,
        })
    }
}
