//! Game time model.
//!
//! Time only moves when a player command succeeds: each applied command
//! advances the clock by exactly one `Turn`, after which the turn phases run.
//! Rejected commands leave the clock untouched.

use std::fmt;

// ── Turn ─────────────────────────────────────────────────────────────────────

/// An absolute turn counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u64);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// The last representable turn.  The clock stops here instead of wrapping.
    pub const LAST: Turn = Turn(u64::MAX);

    /// The turn immediately after `self`, saturating at [`Turn::LAST`].
    #[inline]
    pub fn next(self) -> Turn {
        Turn(self.0.saturating_add(1))
    }

    /// Turns elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Turn) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Turn {
    type Output = Turn;
    #[inline]
    fn add(self, rhs: u64) -> Turn {
        Turn(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TurnClock ─────────────────────────────────────────────────────────────────

/// Tracks the current turn and how many turns have elapsed since the game
/// started.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnClock {
    /// Turn the game (or the restored save) started at.
    pub start: Turn,
    /// The current turn, advanced by `TurnClock::advance()` after each
    /// applied command.
    pub current: Turn,
}

impl TurnClock {
    pub fn new(start: Turn) -> Self {
        Self { start, current: start }
    }

    /// Advance the clock by one turn and return the new current turn.
    #[inline]
    pub fn advance(&mut self) -> Turn {
        self.current = self.current.next();
        self.current
    }

    /// Turns played since `start`.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.current.since(self.start)
    }
}

impl fmt::Display for TurnClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} played)", self.current, self.elapsed())
    }
}
