//! `ta-world` — entity storage for the `rust_ta` engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`component`]   | `Component` bound, sparse `ComponentTable<T>`, `ComponentMap` |
//! | [`store`]       | `EntityStore` (SoA arrays incl. behaviors lists)          |
//! | [`world`]       | `World` — entities plus the game RNG                      |
//! | [`builder`]     | `EntitySpec`, `WorldBuilder` (fluent construction)        |
//! | [`loader`]      | `load_entities_csv`, `load_entities_reader`               |
//! | [`error`]       | `WorldError`, `WorldResult<T>`                            |
//!
//! Entities never own hook logic.  Each one carries an ordered list of
//! behavior-module ids (its *behaviors list*) that the engine consults when
//! an event is addressed to it.

pub mod builder;
pub mod component;
pub mod error;
pub mod loader;
pub mod store;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::{EntitySpec, WorldBuilder};
pub use component::{Component, ComponentMap, ComponentTable};
pub use error::{WorldError, WorldResult};
pub use loader::{load_entities_csv, load_entities_reader};
pub use store::EntityStore;
pub use world::World;
