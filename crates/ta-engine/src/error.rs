use thiserror::Error;

use ta_behavior::BehaviorError;
use ta_core::{CoreError, ModuleId};
use ta_registry::LoadError;
use ta_world::WorldError;

use crate::EngineState;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A handler returned `Err`.  Never swallowed.
    #[error("handler {event:?} of module {module} failed: {source}")]
    Handler {
        module: ModuleId,
        event:  String,
        #[source]
        source: BehaviorError,
    },

    #[error("engine configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("engine builder error: {0}")]
    Builder(String),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("illegal engine transition {from} -> {to}")]
    IllegalTransition { from: EngineState, to: EngineState },
}

impl EngineError {
    pub(crate) fn handler(module: &ModuleId, event: &str, source: BehaviorError) -> Self {
        EngineError::Handler { module: module.clone(), event: event.to_owned(), source }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
