//! Data models
//!
//! Shared between the HTTP client and the console. Wire types use the
//! camelCase field names of the product service.

pub mod metric;
pub mod page;
pub mod product;

// Re-exports
pub use metric::*;
pub use page::*;
pub use product::*;
