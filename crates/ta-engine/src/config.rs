//! TOML configuration loading.
//!
//! ```toml
//! seed              = 42
//! start_turn        = 0
//! no_action_message = "Nothing happens."
//! ```
//!
//! Every key is optional and falls back to `GameConfig::default()`.

use std::path::Path;

use ta_core::GameConfig;

use crate::EngineResult;

/// Read and validate a `GameConfig` from a TOML file.
pub fn load_config(path: &Path) -> EngineResult<GameConfig> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

/// Parse and validate a `GameConfig` from TOML text.
pub fn parse_config(text: &str) -> EngineResult<GameConfig> {
    let config: GameConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
