use thiserror::Error;

/// Unified error type for store operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Request rejected by a store-level validation rule
    #[error("Validation failed: {message}")]
    Validation { message: String },
}

/// Type alias for store operation results
pub type Result<T> = std::result::Result<T, DbError>;
