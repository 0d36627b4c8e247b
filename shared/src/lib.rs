//! Shared types for Stockroom
//!
//! Data model of the inventory console: products, pages, category metrics,
//! filter criteria and the pagination cursor, plus the derivation of list
//! query parameters from them. Used by both the HTTP client and the console.

pub mod error;
pub mod filter;
pub mod models;
pub mod query;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use filter::{Availability, FilterCriteria};
pub use models::{CategoryMetric, PageResponse, Product, ProductPage, OVERALL_CATEGORY};
pub use query::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PaginationCursor, ProductQuery, Sort, SortDirection,
    SortField, offered_page_size,
};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
