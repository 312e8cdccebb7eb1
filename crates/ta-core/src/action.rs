//! The structured command handed to the dispatcher.

use std::collections::BTreeMap;

use crate::EntityId;

/// Immutable input bundle for one player command.
///
/// Produced by the command layer (tokenizer + pattern matcher) and passed by
/// shared reference to every handler; handlers never mutate it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionContext {
    /// The verb as typed (or as normalized by the parser), e.g. `"take"`.
    pub verb: String,

    /// Direct object of the command, if any.
    pub object_ref: Option<EntityId>,

    /// Who is acting, usually the player entity.
    pub actor_id: EntityId,

    /// Parser-specific extras (indirect object, preposition, raw text, …).
    pub extra_fields: BTreeMap<String, String>,
}

impl ActionContext {
    pub fn new(verb: impl Into<String>, actor_id: EntityId) -> Self {
        Self {
            verb: verb.into(),
            object_ref: None,
            actor_id,
            extra_fields: BTreeMap::new(),
        }
    }

    /// Attach a direct object.
    pub fn with_object(mut self, object: EntityId) -> Self {
        self.object_ref = Some(object);
        self
    }

    /// Attach a parser extra.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.insert(key.into(), value.into());
        self
    }

    /// Look up a parser extra.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extra_fields.get(key).map(String::as_str)
    }
}
