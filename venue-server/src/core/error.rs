use thiserror::Error;

/// Errors surfaced while bootstrapping or running the server itself
///
/// Request-level failures use [`crate::utils::AppError`]; this type only
/// covers startup and shutdown paths.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database initialization failed: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
