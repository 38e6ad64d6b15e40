use thiserror::Error;

/// Application-wide error type.
///
/// External-service failures (classification provider unreachable or
/// returning garbage) never appear here: the suggester absorbs them into
/// "no suggestion" so they cannot fail a mapping workflow.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;
