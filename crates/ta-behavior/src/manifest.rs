//! Module declaration surface.
//!
//! # TOML format
//!
//! ```toml
//! [[hook_definitions]]
//! hook_id         = "turn_light_decay"
//! invocation_kind = "turn_phase"
//! after           = ["turn_npc_moves"]
//! description     = "Burning lamps lose fuel."
//!
//! [[events]]
//! event = "on_light_decay"
//! hook  = "turn_light_decay"
//!
//! [[verbs]]
//! word            = "light"
//! event           = "cmd_light"
//! synonyms        = ["ignite"]
//! object_required = true
//! ```
//!
//! Every table is optional.  Verbs are consumed by the parser layer as well
//! as by the dispatcher, which indexes them by word and synonym.

use serde::{Deserialize, Serialize};

use ta_core::HookId;

use crate::{BehaviorResult, HookDefinition};

/// Binds the callable named `event` (in the declaring module) to `hook`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDecl {
    pub event:       String,
    pub hook:        HookId,
    #[serde(default)]
    pub description: String,
}

impl EventDecl {
    pub fn new(event: impl Into<String>, hook: impl Into<HookId>) -> Self {
        Self { event: event.into(), hook: hook.into(), description: String::new() }
    }
}

/// A command word contributed by a module, answered by the command callable
/// named `event`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbDecl {
    pub word:            String,
    pub event:           String,
    #[serde(default)]
    pub synonyms:        Vec<String>,
    #[serde(default)]
    pub object_required: bool,
}

impl VerbDecl {
    pub fn new(word: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            word:            word.into(),
            event:           event.into(),
            synonyms:        Vec::new(),
            object_required: false,
        }
    }

    pub fn synonym(mut self, word: impl Into<String>) -> Self {
        self.synonyms.push(word.into());
        self
    }

    pub fn requires_object(mut self) -> Self {
        self.object_required = true;
        self
    }

    /// The canonical word followed by every synonym.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.word.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }
}

/// Everything a module declares.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub hook_definitions: Vec<HookDefinition>,
    pub events:           Vec<EventDecl>,
    pub verbs:            Vec<VerbDecl>,
}

impl Manifest {
    /// Parse a manifest authored as TOML.
    pub fn from_toml_str(s: &str) -> BehaviorResult<Manifest> {
        Ok(toml::from_str(s)?)
    }

    /// Append every declaration of `other`, keeping declaration order.
    pub fn merge(&mut self, other: Manifest) {
        self.hook_definitions.extend(other.hook_definitions);
        self.events.extend(other.events);
        self.verbs.extend(other.verbs);
    }

    pub fn is_empty(&self) -> bool {
        self.hook_definitions.is_empty() && self.events.is_empty() && self.verbs.is_empty()
    }
}
