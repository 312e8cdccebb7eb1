use thiserror::Error;

use ta_core::{HookId, ModuleId};

use crate::ValidationError;

/// Load-time structural errors.  The engine must not start on any of them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("module {module} supplied by source {second:?} was already loaded from {first:?}")]
    DuplicateModule {
        module: ModuleId,
        first:  String,
        second: String,
    },

    #[error("hook {hook} defined by {second} was already defined by {first}")]
    DuplicateHook {
        hook:   HookId,
        first:  ModuleId,
        second: ModuleId,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type LoadResult<T> = Result<T, LoadError>;
