//! Read-only input passed to every handler callback.

use ta_core::{ActionContext, EntityId, Turn};

/// What a handler is being asked about.
///
/// Built by the engine for each invocation.  The mutable side of the call is
/// the separate `&mut World` argument; nothing reachable from here may be
/// mutated.
#[derive(Clone, Copy, Debug)]
pub struct HandlerContext<'a> {
    /// Current turn.  During turn phases this is the turn just advanced to.
    pub turn: Turn,

    /// The command that started this dispatch (and, for turn phases, the
    /// command whose success advanced the turn).
    pub action: &'a ActionContext,

    /// Entity the invocation is addressed to.  The command's object for verb
    /// dispatch, the entity for entity-scoped events, `None` for turn phases.
    pub target: Option<EntityId>,
}

impl<'a> HandlerContext<'a> {
    #[inline]
    pub fn new(turn: Turn, action: &'a ActionContext, target: Option<EntityId>) -> Self {
        Self { turn, action, target }
    }

    /// Context for dispatching `action` as a command: the target is its object.
    #[inline]
    pub fn for_command(turn: Turn, action: &'a ActionContext) -> Self {
        Self::new(turn, action, action.object_ref)
    }

    /// Same turn and action, different target.
    #[inline]
    pub fn retarget(&self, target: Option<EntityId>) -> Self {
        Self { target, ..*self }
    }
}
