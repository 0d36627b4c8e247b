//! Product queries
//!
//! Every filter or cursor change issues exactly one list query. Queries may
//! overlap; only the most recently issued one gets to publish.

use super::*;
use shared::{FilterCriteria, ProductPage, Sort};

/// How a refresh ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched page is now published
    Published,
    /// Request failed; an empty page is published
    Failed,
    /// A newer query was issued meanwhile; the result was dropped
    Superseded,
}

impl Console {
    /// Fetch the page for the current filters and cursor and publish it.
    ///
    /// On success the metrics for the new page's categories are refreshed
    /// before returning.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.transition(AppState::issue_query).await;
        tracing::debug!(seq = ticket.seq, query = ?ticket.query, "Issuing product query");

        let result = self.service.list_products(&ticket.query).await;

        match result {
            Ok(response) => {
                let page = ProductPage::from(response);
                let rows = page.len();
                let total = page.total_elements;
                let (published, categories) = self
                    .transition(|state| {
                        let (state, published) = state.publish_page(ticket.seq, page);
                        let categories = state.categories.clone();
                        (state, (published, categories))
                    })
                    .await;

                if !published {
                    tracing::debug!(seq = ticket.seq, "Discarding superseded product page");
                    return RefreshOutcome::Superseded;
                }
                tracing::info!(seq = ticket.seq, rows, total, "Published product page");
                self.refresh_metrics(categories).await;
                RefreshOutcome::Published
            }
            Err(e) => {
                let published = self
                    .transition(|state| state.publish_failure(ticket.seq))
                    .await;
                if !published {
                    tracing::debug!(seq = ticket.seq, error = %e, "Discarding superseded query failure");
                    return RefreshOutcome::Superseded;
                }
                tracing::error!(seq = ticket.seq, error = %e, "Product query failed");
                self.notify_failure("Failed to load products", &e.into());
                RefreshOutcome::Failed
            }
        }
    }

    /// Apply a confirmed search submission and refetch from page 0
    pub async fn submit_search(&self, filter: FilterCriteria) -> RefreshOutcome {
        self.transition(|state| (state.with_filter(filter), ())).await;
        self.refresh().await
    }

    /// Replace filters and cursor together with a single query. The cursor
    /// is taken as given, page included.
    pub async fn set_view(
        &self,
        filter: FilterCriteria,
        cursor: PaginationCursor,
    ) -> RefreshOutcome {
        self.transition(|state| (state.with_filter(filter).with_cursor(cursor), ()))
            .await;
        self.refresh().await
    }

    pub async fn set_cursor(&self, cursor: PaginationCursor) -> RefreshOutcome {
        self.transition(|state| (state.with_cursor(cursor), ())).await;
        self.refresh().await
    }

    pub async fn go_to_page(&self, page: u32) -> RefreshOutcome {
        let cursor = self.state.read().await.cursor.with_page(page);
        self.set_cursor(cursor).await
    }

    /// Change the page size; returns to the first page
    pub async fn set_page_size(&self, page_size: u32) -> ConsoleResult<RefreshOutcome> {
        let current = self.state.read().await.cursor;
        let cursor = PaginationCursor::new(page_size)?.with_sort(current.sort);
        Ok(self.set_cursor(cursor).await)
    }

    pub async fn set_sort(&self, sort: Option<Sort>) -> RefreshOutcome {
        let cursor = self.state.read().await.cursor.with_sort(sort);
        self.set_cursor(cursor).await
    }
}
