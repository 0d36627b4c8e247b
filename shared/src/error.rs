//! Error types for the shared crate
//!
//! Local validation failures. These never reach the network: a product that
//! fails validation is not submitted.

use thiserror::Error;

/// Reasons a product is rejected before submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty or whitespace
    #[error("Product name is required")]
    MissingName,

    /// Category is empty or whitespace
    #[error("Product category is required")]
    MissingCategory,

    /// Unit price is zero or negative
    #[error("Unit price must be greater than 0, got {0}")]
    NonPositivePrice(String),

    /// Stock quantity is negative
    #[error("Stock quantity cannot be negative, got {0}")]
    NegativeStock(i64),

    /// Text that should name an availability option did not
    #[error("Unknown availability: {0}")]
    UnknownAvailability(String),

    /// Text that should name a sortable field did not
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// Sort direction other than asc or desc
    #[error("Unknown sort direction: {0}")]
    UnknownSortDirection(String),

    /// Page size outside the offered options
    #[error("Page size must be one of {options:?}, got {size}")]
    UnsupportedPageSize { size: u32, options: &'static [u32] },

    /// Edited product carries a different id than the row it edits
    #[error("Product id {found} does not match the edited row {expected}")]
    IdMismatch { expected: i64, found: i64 },

    /// Page size must be positive
    #[error("Page size must be greater than 0")]
    ZeroPageSize,
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
