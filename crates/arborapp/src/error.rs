use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArborError {
    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Import failed: {0}")]
    ImportParse(String),

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ArborError>;
