//! Console - query coordinator, metrics aggregator and mutation handlers
//!
//! [`Console`] owns the [`AppState`] behind a lock and drives it from the
//! product service. Every state change happens in a short write section
//! that never spans a network call.
//!
//! # Module structure
//!
//! - `query` - Filter and cursor changes, list queries
//! - `metrics` - Per-category aggregates fan-out
//! - `mutation` - Optimistic writes with rollback

mod metrics;
mod mutation;
mod query;

pub use metrics::fetch_metrics;
pub use mutation::MutationOutcome;
pub use query::RefreshOutcome;

use std::sync::Arc;
use tokio::sync::RwLock;

use shared::PaginationCursor;
use stockroom_client::ProductService;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::prompt::{Notice, UserPrompt};
use crate::state::AppState;

/// Inventory console core
#[derive(Clone)]
pub struct Console {
    service: Arc<dyn ProductService>,
    prompt: Arc<dyn UserPrompt>,
    state: Arc<RwLock<AppState>>,
    restock_quantity: i64,
}

impl Console {
    pub fn new(
        service: Arc<dyn ProductService>,
        prompt: Arc<dyn UserPrompt>,
        config: &ConsoleConfig,
    ) -> ConsoleResult<Self> {
        let cursor = PaginationCursor::new(config.page_size)?;
        Ok(Self {
            service,
            prompt,
            state: Arc::new(RwLock::new(AppState::new(cursor))),
            restock_quantity: config.default_restock_quantity,
        })
    }

    /// Copy of the current state for display
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Run one transition under the write lock
    async fn transition<R>(&self, f: impl FnOnce(AppState) -> (AppState, R)) -> R {
        let mut guard = self.state.write().await;
        let (next, out) = f(std::mem::take(&mut *guard));
        *guard = next;
        out
    }

    fn notify_failure(&self, what: &str, error: &ConsoleError) {
        self.prompt.notify(Notice::error(format!("{what}: {error}")));
    }
}
