//! Entity Event Invoker: entity-scoped and global event fan-in.

use ta_behavior::HandlerContext;
use ta_core::{EntityId, EventResult, HookId, ModuleId};
use ta_registry::Registry;
use ta_world::World;

use crate::{EngineError, EngineResult};

/// Aggregated outcome of one invocation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Invocation {
    pub result:   EventResult,
    /// Number of handlers that ran.
    pub handlers: usize,
}

/// Invokes event handlers and aggregates their results.
///
/// Every matching handler runs, in a fixed order, and the results combine
/// with [`EventResult::aggregate`]: `allow` is the conjunction, feedback is
/// joined in invocation order.  Nothing short-circuits.
#[derive(Clone, Copy, Debug)]
pub struct Invoker<'r> {
    registry: &'r Registry,
}

impl<'r> Invoker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// `Some(entity)`: `name` is an event name, resolved through the entity's
    /// behaviors list.  `None`: `name` is a hook id, resolved through every
    /// module bound to it.
    pub fn invoke(
        &self,
        entity: Option<EntityId>,
        name:   &str,
        ctx:    &HandlerContext<'_>,
        world:  &mut World,
    ) -> EngineResult<EventResult> {
        let invocation = match entity {
            Some(e) => self.invoke_entity(e, name, ctx, world)?,
            None    => self.invoke_hook(&HookId::from(name), ctx, world)?,
        };
        Ok(invocation.result)
    }

    /// Run `event` on every module of `entity`'s behaviors list that handles
    /// it, in list order.
    ///
    /// An entity whose list has no such module yields the neutral result.
    /// So does an unknown entity, with a warning.
    pub fn invoke_entity(
        &self,
        entity: EntityId,
        event:  &str,
        ctx:    &HandlerContext<'_>,
        world:  &mut World,
    ) -> EngineResult<Invocation> {
        // Owned copy: handlers get `&mut World` while we iterate.
        let Some(list) = world.entities.behaviors(entity).map(<[ModuleId]>::to_vec) else {
            tracing::warn!(%entity, event, "event addressed to unknown entity");
            return Ok(Invocation::default());
        };

        let ctx = ctx.retarget(Some(entity));
        let mut results = Vec::new();
        for id in &list {
            let Some(loaded) = self.registry.module(id) else { continue };
            let Some(handler) = loaded.module.event_handler(event) else { continue };
            let r = handler
                .handle(&ctx, world)
                .map_err(|e| EngineError::handler(id, event, e))?;
            results.push(r);
        }

        tracing::debug!(%entity, event, handlers = results.len(), "entity event invoked");
        Ok(Invocation { handlers: results.len(), result: EventResult::aggregate(results) })
    }

    /// Run every handler bound to `hook`, in binding registration order, with
    /// no target entity.  A hook with no bindings yields the neutral result.
    pub fn invoke_hook(
        &self,
        hook:  &HookId,
        ctx:   &HandlerContext<'_>,
        world: &mut World,
    ) -> EngineResult<Invocation> {
        let ctx = ctx.retarget(None);
        let mut results = Vec::new();
        for (module, event) in self.registry.bound_modules(hook) {
            let Some(handler) = module.event_handler(event) else { continue };
            let r = handler
                .handle(&ctx, world)
                .map_err(|e| EngineError::handler(module.id(), event, e))?;
            results.push(r);
        }

        Ok(Invocation { handlers: results.len(), result: EventResult::aggregate(results) })
    }
}
