//! `ta-core` — foundational types for the `rust_ta` text-adventure engine.
//!
//! This crate is a dependency of every other `ta-*` crate.  It intentionally
//! has no `ta-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `ModuleId`, `HookId`                      |
//! | [`tier`]        | `Tier` precedence class                               |
//! | [`turn`]        | `Turn`, `TurnClock`                                   |
//! | [`rng`]         | `GameRng` (seeded, deterministic)                     |
//! | [`action`]      | `ActionContext` — immutable command input             |
//! | [`outcome`]     | `HandlerResult`, `EventResult`                        |
//! | [`config`]      | `GameConfig`                                          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `ta-engine` for TOML config files.             |

pub mod action;
pub mod config;
pub mod error;
pub mod ids;
pub mod outcome;
pub mod rng;
pub mod tier;
pub mod turn;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::ActionContext;
pub use config::GameConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{EntityId, HookId, ModuleId};
pub use outcome::{EventResult, FEEDBACK_SEPARATOR, HandlerResult};
pub use rng::GameRng;
pub use tier::Tier;
pub use turn::{Turn, TurnClock};
