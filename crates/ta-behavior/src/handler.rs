//! Typed handler traits: the callables a behavior module registers.

use ta_core::{EventResult, HandlerResult};
use ta_world::World;

use crate::{BehaviorResult, HandlerContext};

// ── Applicability ─────────────────────────────────────────────────────────────

/// A command handler's answer.
///
/// The dispatcher walks candidates in tier order until one returns
/// `Applicable`; `NotApplicable` means "not my object, ask the next module".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applicability {
    /// Definitive outcome (success or failure).  Stops the walk.
    Applicable(HandlerResult),
    /// This handler does not apply to the command's object.
    NotApplicable,
}

impl Applicability {
    pub fn success(message: impl Into<String>) -> Self {
        Applicability::Applicable(HandlerResult::success(message))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Applicability::Applicable(HandlerResult::failure(message))
    }

    /// The definitive result, if any.
    pub fn into_result(self) -> Option<HandlerResult> {
        match self {
            Applicability::Applicable(r) => Some(r),
            Applicability::NotApplicable => None,
        }
    }
}

impl From<HandlerResult> for Applicability {
    fn from(r: HandlerResult) -> Self {
        Applicability::Applicable(r)
    }
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// Answers a command verb.
///
/// Each handler decides for itself whether it applies, usually by testing
/// the kind or components of `ctx.target`.  Returning `Err` is a fatal bug
/// and aborts the dispatch.
///
/// Closures of the matching shape implement this trait automatically:
///
/// ```rust,ignore
/// builder.command(VerbDecl::new("take", "cmd_take"), |ctx, world| {
///     match ctx.target {
///         Some(obj) if world.entities.is_kind(obj, "item") => Ok(Applicability::success("Taken.")),
///         _ => Ok(Applicability::NotApplicable),
///     }
/// });
/// ```
pub trait CommandHandler: Send + Sync + 'static {
    fn handle(&self, ctx: &HandlerContext<'_>, world: &mut World) -> BehaviorResult<Applicability>;
}

impl<F> CommandHandler for F
where
    F: Fn(&HandlerContext<'_>, &mut World) -> BehaviorResult<Applicability> + Send + Sync + 'static,
{
    #[inline]
    fn handle(&self, ctx: &HandlerContext<'_>, world: &mut World) -> BehaviorResult<Applicability> {
        self(ctx, world)
    }
}

/// Answers an entity event or a turn phase.
///
/// `ctx.target` is the addressed entity for entity hooks and `None` for turn
/// phases.  Results from every handler bound to the same hook are
/// aggregated, never short-circuited.
pub trait EventHandler: Send + Sync + 'static {
    fn handle(&self, ctx: &HandlerContext<'_>, world: &mut World) -> BehaviorResult<EventResult>;
}

impl<F> EventHandler for F
where
    F: Fn(&HandlerContext<'_>, &mut World) -> BehaviorResult<EventResult> + Send + Sync + 'static,
{
    #[inline]
    fn handle(&self, ctx: &HandlerContext<'_>, world: &mut World) -> BehaviorResult<EventResult> {
        self(ctx, world)
    }
}
