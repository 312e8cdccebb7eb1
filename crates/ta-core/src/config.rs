//! Top-level game configuration.

use crate::{CoreError, CoreResult, Turn};

/// Message returned when no loaded module claims a verb.
pub const DEFAULT_NO_ACTION_MESSAGE: &str = "You can't do that here.";

/// Top-level game configuration.
///
/// Typically loaded from a TOML file by `ta-engine` and passed to the engine
/// builder.  Keys missing from the file fall back to [`GameConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Master RNG seed.  The same seed always produces identical games.
    pub seed: u64,

    /// Turn the clock starts at (non-zero when resuming a saved game).
    pub start_turn: Turn,

    /// Message of the definitive failure returned when no handler claims a verb.
    pub no_action_message: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed:              0,
            start_turn:        Turn::ZERO,
            no_action_message: DEFAULT_NO_ACTION_MESSAGE.to_owned(),
        }
    }
}

impl GameConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.no_action_message.trim().is_empty() {
            return Err(CoreError::Config(
                "no_action_message must not be empty".to_owned(),
            ));
        }
        if self.start_turn == Turn::LAST {
            return Err(CoreError::Config(format!(
                "start_turn {} leaves no room for the clock to advance",
                self.start_turn.0
            )));
        }
        Ok(())
    }
}
