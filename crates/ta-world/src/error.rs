use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity {0:?} is defined more than once")]
    DuplicateEntity(String),

    #[error("entity {entity:?} is located in unknown entity {location:?}")]
    UnknownLocation {
        entity:   String,
        location: String,
    },

    #[error("entity CSV parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
