//! `ta-behavior` — behavior module declarations and handler traits.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`hook`]     | `InvocationKind`, `HookDefinition`, `Relation`, id prefixes      |
//! | [`manifest`] | `EventDecl`, `VerbDecl`, `Manifest` (TOML-loadable)              |
//! | [`context`]  | `HandlerContext<'a>` — read-only input shared by all handlers    |
//! | [`handler`]  | `Applicability`, `CommandHandler`, `EventHandler` traits         |
//! | [`module`]   | `BehaviorModule`, `ModuleBuilder`                                |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! A behavior module is a bundle of *declarations* (hooks, event bindings,
//! verbs) plus a table of typed callables keyed by event name.  Nothing here
//! is looked up by reflection: the registry resolves every declared event to
//! a callable once at load time, and play-time dispatch only walks
//! precomputed tables.
//!
//! Command handlers return [`Applicability`]: `NotApplicable` lets the
//! dispatcher fall through to the next candidate, `Applicable(result)` stops
//! the walk.  Event handlers return an `EventResult` that is aggregated with
//! every other handler bound to the same hook.

pub mod context;
pub mod error;
pub mod handler;
pub mod hook;
pub mod manifest;
pub mod module;


pub use context::HandlerContext;
pub use error::{BehaviorError, BehaviorResult};
pub use handler::{Applicability, CommandHandler, EventHandler};
pub use hook::{ENTITY_PREFIX, HookDefinition, InvocationKind, Relation, TURN_PHASE_PREFIX};
pub use manifest::{EventDecl, Manifest, VerbDecl};
pub use module::{BehaviorModule, ModuleBuilder};
