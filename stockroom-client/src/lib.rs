//! Stockroom Client - HTTP client for the product service
//!
//! Provides the [`ProductService`] seam the console talks to and its
//! network implementation over `reqwest`.

pub mod config;
pub mod error;
pub mod http;
pub mod service;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use service::ProductService;

// Re-export shared types for convenience
pub use shared::{PageResponse, Product, ProductQuery};
