//! `ta-registry` — loading, cataloguing, and validating behavior modules.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`source`]   | `ModuleSource`, `LoadedModule`, `ModuleTable`                   |
//! | [`catalog`]  | `HookCatalog`, `HookEntry`, `EventBinding`                      |
//! | [`vocab`]    | `VerbTable`, `VerbCandidate`, `VerbInfo`                        |
//! | [`validate`] | `Violation`, `ValidationError`, `validate`                      |
//! | [`loader`]   | `Loader` — two-phase load entry point                           |
//! | [`registry`] | `Registry` — the owned, read-only result of a load              |
//! | [`error`]    | `LoadError`, `LoadResult<T>`                                    |
//!
//! # Load pipeline
//!
//! ```text
//! ① Collect   — every module of every source, in supply order:
//!                 module table   (duplicate name    → LoadError::DuplicateModule)
//!                 hook catalog   (duplicate hook id → LoadError::DuplicateHook)
//!                 event bindings, verb table
//! ② Validate  — kind/prefix, references, handler tables, entity lists,
//!               cycles.  Every violation is collected, then reported as
//!               one LoadError::Validation.
//! ③ Schedule  — ExecutionOrder computed once and stored in the Registry.
//! ```
//!
//! No handler code runs during a load.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod registry;
pub mod source;
pub mod validate;
pub mod vocab;


pub use catalog::{EventBinding, HookCatalog, HookEntry};
pub use error::{LoadError, LoadResult};
pub use loader::Loader;
pub use registry::Registry;
pub use source::{LoadedModule, ModuleSource, ModuleTable};
pub use validate::{ValidationError, Violation, validate};
pub use vocab::{VerbCandidate, VerbInfo, VerbTable};
