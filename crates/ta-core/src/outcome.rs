//! Result values produced by handlers.
//!
//! These are ordinary play-time outcomes, not errors: a declined command or a
//! vetoed event is expected control flow, always paired with a user-facing
//! message for the narration layer.

use std::collections::BTreeMap;

/// Separator used when joining fan-in feedback.
pub const FEEDBACK_SEPARATOR: &str = "; ";

// ── HandlerResult ─────────────────────────────────────────────────────────────

/// Outcome of a command-verb dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandlerResult {
    pub success: bool,
    pub message: String,
    /// Structured extras for the narration layer (e.g. `"item" => "lamp"`).
    pub data: Option<BTreeMap<String, String>>,
}

impl HandlerResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }

    /// Attach one structured datum, creating the map on first use.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

// ── EventResult ───────────────────────────────────────────────────────────────

/// Outcome of an entity or turn-phase event invocation.
///
/// `EventResult::default()` is the neutral result: allowed, no feedback.
/// Absence of an opinion is never a denial.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventResult {
    pub allow: bool,
    pub feedback: Option<String>,
}

impl Default for EventResult {
    fn default() -> Self {
        Self::neutral()
    }
}

impl EventResult {
    pub fn neutral() -> Self {
        Self { allow: true, feedback: None }
    }

    pub fn allow(feedback: impl Into<String>) -> Self {
        Self { allow: true, feedback: Some(feedback.into()) }
    }

    pub fn deny(feedback: impl Into<String>) -> Self {
        Self { allow: false, feedback: Some(feedback.into()) }
    }

    /// Combine fan-in results.
    ///
    /// `allow` is the conjunction of every input; `feedback` is the ordered
    /// join of every non-empty feedback, or `None` if there is none.  An
    /// empty input yields the neutral result.
    pub fn aggregate<I>(results: I) -> EventResult
    where
        I: IntoIterator<Item = EventResult>,
    {
        let mut allow = true;
        let mut parts: Vec<String> = Vec::new();
        for r in results {
            allow &= r.allow;
            if let Some(text) = r.feedback.filter(|t| !t.is_empty()) {
                parts.push(text);
            }
        }
        EventResult {
            allow,
            feedback: (!parts.is_empty()).then(|| parts.join(FEEDBACK_SEPARATOR)),
        }
    }
}
