//! `ta-schedule` — turn-phase ordering.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`graph`]   | `DependencyGraph`, `HookNode`, `Edge`                      |
//! | [`cycle`]   | `find_cycles`, `Cycle`, `CycleEdge`                        |
//! | [`order`]   | `ExecutionOrder` (Kahn's algorithm)                        |
//! | [`error`]   | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Ordering model (summary)
//!
//! ```text
//! A after  B   ⇒  edge B → A
//! A before B   ⇒  edge A → B
//! ```
//!
//! Both spellings feed the same graph, so they are interchangeable.  Among
//! hooks with no relative constraint the one registered first runs first,
//! which makes the order identical across runs for a fixed module set.
//!
//! The graph is transient: it is built once at load, consumed to produce the
//! `ExecutionOrder`, and dropped.  Only the order is kept.

pub mod cycle;
pub mod error;
pub mod graph;
pub mod order;


pub use cycle::{Cycle, CycleEdge, find_cycles};
pub use error::{ScheduleError, ScheduleResult};
pub use graph::{DependencyGraph, Edge, HookNode};
pub use order::ExecutionOrder;
