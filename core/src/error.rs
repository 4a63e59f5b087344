use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error in {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("Session lock poisoned by a panicked holder")]
    LockPoisoned,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
