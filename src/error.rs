/// Engine-level errors
///
/// None of these are fatal to the process. Feed loaders catch them, log them and
/// fall back to an empty or neutral state.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transient failure: {0}")]
    Transient(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the caller should retry later or show a neutral state
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Transient(_) | AppError::Store(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
