//! Stockroom Console - inventory console core
//!
//! Keeps the product table, search filters and category metrics consistent
//! with the product service and with each other:
//!
//! - [`Console`] issues list queries for filter and cursor changes, fans out
//!   the metrics requests and runs optimistic mutations
//! - [`AppState`] is the state it publishes
//! - [`UserPrompt`] is how it reports failures and asks for confirmation

pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod logger;
pub mod prompt;
pub mod state;

#[cfg(test)]
mod mock;

pub use config::ConsoleConfig;
pub use console::{Console, MutationOutcome, RefreshOutcome, fetch_metrics};
pub use error::{ConsoleError, ConsoleResult};
pub use prompt::{Notice, NoticeLevel, TerminalPrompt, UserPrompt};
pub use state::AppState;

// Re-export for convenience
pub use shared;
pub use stockroom_client;
