//! `ta-engine` — the play-time side of the `rust_ta` engine.
//!
//! # Per-command flow
//!
//! ```text
//! submit(action):
//!   Idle → Resolving      Dispatcher walks the verb's candidates,
//!                         tier 1 first, until one is Applicable
//!        → Rejected       command failed (or nobody claimed it) → Idle
//!        → Applied
//!        → TurnAdvancing  clock advances by one turn
//!        → PhaseExecuting ×N, one per hook in ExecutionOrder,
//!                         every bound handler invoked with no target
//!        → Idle
//! ```
//!
//! Handler errors are fatal: they abort the command, return
//! `EngineError::Handler`, and leave the engine back in `Idle`.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`resolver`] | `Dispatcher`, `Resolution` — tiered verb dispatch         |
//! | [`invoker`]  | `Invoker`, `Invocation` — entity and global event fan-in  |
//! | [`turn`]     | `run_phase`, `run_turn`                                   |
//! | [`engine`]   | `Engine` — owns world, registry, clock, state             |
//! | [`builder`]  | `EngineBuilder`                                           |
//! | [`state`]    | `EngineState` and its transition relation                 |
//! | [`observer`] | `TurnObserver`, `NoopObserver`                            |
//! | [`report`]   | `TurnReport`, `PhaseOutcome`                              |
//! | [`config`]   | `load_config`, `parse_config` (TOML)                      |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                          |

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod invoker;
pub mod observer;
pub mod report;
pub mod resolver;
pub mod state;
pub mod turn;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use config::{load_config, parse_config};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use invoker::{Invocation, Invoker};
pub use observer::{NoopObserver, TurnObserver};
pub use report::{PhaseOutcome, TurnReport};
pub use resolver::{Dispatcher, Resolution};
pub use state::EngineState;
pub use turn::{run_phase, run_turn};
