//! Module precedence classes.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Ordinal precedence class of a loaded behavior module.
///
/// Lower ordinal = higher precedence: a tier-1 module is asked before a
/// tier-3 module and may fully supersede it.  Tiers are declared per module
/// source at load time and never change afterwards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tier(pub u8);

impl Tier {
    /// Game-specific overrides.
    pub const GAME: Tier = Tier(1);
    /// Shared libraries of behaviors reused across games.
    pub const SHARED: Tier = Tier(2);
    /// Engine-provided defaults.
    pub const CORE: Tier = Tier(3);
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.0)
    }
}

impl FromStr for Tier {
    type Err = CoreError;

    /// Accepts a bare ordinal (`"2"`) or a `tier` prefix (`"tier2"`, `"tier 2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("tier").trim();
        match digits.parse::<u8>() {
            Ok(0) => Err(CoreError::Parse(format!("tier must be at least 1, got {s:?}"))),
            Ok(n) => Ok(Tier(n)),
            Err(_) => Err(CoreError::Parse(format!("invalid tier {s:?}"))),
        }
    }
}
