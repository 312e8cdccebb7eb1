use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("manifest parse error: {0}")]
    Manifest(#[from] toml::de::Error),

    /// Raised by a handler that hit a state it cannot handle.  Always fatal:
    /// the engine propagates it instead of skipping the handler.
    #[error("handler failed: {0}")]
    Handler(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
