//! Console error types

use thiserror::Error;

/// Console error type
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Product rejected before submission
    #[error("Validation failed: {0}")]
    Validation(#[from] shared::ValidationError),

    #[error("Client error: {0}")]
    Client(#[from] stockroom_client::ClientError),

    /// Product id is not on the current page
    #[error("Product {0} not found on the current page")]
    NotFound(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
