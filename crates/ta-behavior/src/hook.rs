//! Hook declarations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use ta_core::HookId;

/// Lexical prefix every turn-phase hook id must carry.
pub const TURN_PHASE_PREFIX: &str = "turn_";

/// Lexical prefix every entity hook id must carry.
pub const ENTITY_PREFIX: &str = "entity_";

// ── InvocationKind ────────────────────────────────────────────────────────────

/// How a hook is fired.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationKind {
    /// Fires once globally per turn, in `ExecutionOrder`.
    TurnPhase,
    /// Fires per entity, resolved through that entity's behaviors list.
    Entity,
}

impl InvocationKind {
    /// The id prefix hooks of this kind must carry.
    pub fn prefix(self) -> &'static str {
        match self {
            InvocationKind::TurnPhase => TURN_PHASE_PREFIX,
            InvocationKind::Entity    => ENTITY_PREFIX,
        }
    }

    /// The kind implied by a hook id's prefix, or `None` if it has neither.
    pub fn from_hook_id(id: &HookId) -> Option<InvocationKind> {
        let s = id.as_str();
        if s.starts_with(TURN_PHASE_PREFIX) {
            Some(InvocationKind::TurnPhase)
        } else if s.starts_with(ENTITY_PREFIX) {
            Some(InvocationKind::Entity)
        } else {
            None
        }
    }
}

impl fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationKind::TurnPhase => f.write_str("turn_phase"),
            InvocationKind::Entity    => f.write_str("entity"),
        }
    }
}

// ── Relation ──────────────────────────────────────────────────────────────────

/// Which side of a `HookDefinition` an ordering constraint was declared on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Relation {
    After,
    Before,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::After  => f.write_str("after"),
            Relation::Before => f.write_str("before"),
        }
    }
}

// ── HookDefinition ────────────────────────────────────────────────────────────

/// A named extension point declared by a behavior module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookDefinition {
    pub hook_id:         HookId,
    pub invocation_kind: InvocationKind,
    /// Hooks that must run before this one.
    #[serde(default)]
    pub after:           BTreeSet<HookId>,
    /// Hooks that must run after this one.
    #[serde(default)]
    pub before:          BTreeSet<HookId>,
    #[serde(default)]
    pub description:     String,
}

impl HookDefinition {
    pub fn new(hook_id: impl Into<HookId>, invocation_kind: InvocationKind) -> Self {
        Self {
            hook_id: hook_id.into(),
            invocation_kind,
            after: BTreeSet::new(),
            before: BTreeSet::new(),
            description: String::new(),
        }
    }

    pub fn turn_phase(hook_id: impl Into<HookId>) -> Self {
        Self::new(hook_id, InvocationKind::TurnPhase)
    }

    pub fn entity(hook_id: impl Into<HookId>) -> Self {
        Self::new(hook_id, InvocationKind::Entity)
    }

    pub fn after(mut self, hook: impl Into<HookId>) -> Self {
        self.after.insert(hook.into());
        self
    }

    pub fn before(mut self, hook: impl Into<HookId>) -> Self {
        self.before.insert(hook.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// `true` if the id's prefix agrees with the declared kind.
    pub fn kind_matches_id(&self) -> bool {
        InvocationKind::from_hook_id(&self.hook_id) == Some(self.invocation_kind)
    }

    /// Every ordering constraint, `after` entries first, each side in id order.
    pub fn constraints(&self) -> impl Iterator<Item = (Relation, &HookId)> + '_ {
        self.after
            .iter()
            .map(|h| (Relation::After, h))
            .chain(self.before.iter().map(|h| (Relation::Before, h)))
    }
}
