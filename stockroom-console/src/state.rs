//! Application state
//!
//! [`AppState`] holds everything the console shows: filters, cursor, the
//! published page and its categories, and the metrics rows. Transitions take
//! the state by value and hand back the next one, so a caller holding the
//! lock swaps the whole value in one step.

use shared::{CategoryMetric, FilterCriteria, PaginationCursor, Product, ProductPage, ProductQuery};

/// A list request that has been issued but not yet published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub seq: u64,
    pub query: ProductQuery,
}

/// Local change applied ahead of a write request
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Set the stock quantity of one row
    SetStock { id: i64, quantity: i64 },
    /// Replace one row with an edited copy
    Replace { id: i64, product: Product },
    /// Remove one row, total shrinks by one
    Remove { id: i64 },
    /// Append an unsaved product, total grows by one
    Append { product: Product },
}

/// What is needed to take a [`Patch`] back
#[derive(Debug, Clone, PartialEq)]
pub enum Undo {
    Stock { id: i64, previous: i64 },
    Row { id: i64, previous: Product },
    Removed { index: usize, product: Product },
    Appended { product: Product },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub filter: FilterCriteria,
    pub cursor: PaginationCursor,
    pub page: ProductPage,
    /// Distinct categories of the published page
    pub categories: Vec<String>,
    pub metrics: Vec<CategoryMetric>,
    query_seq: u64,
    metrics_seq: u64,
}

impl AppState {
    pub fn new(cursor: PaginationCursor) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Replace the filters; always back to the first page
    pub fn with_filter(mut self, filter: FilterCriteria) -> Self {
        self.filter = filter;
        self.cursor = self.cursor.reset();
        self
    }

    pub fn with_cursor(mut self, cursor: PaginationCursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Issue a list request for the current filters and cursor
    pub fn issue_query(mut self) -> (Self, QueryTicket) {
        self.query_seq += 1;
        let ticket = QueryTicket {
            seq: self.query_seq,
            query: ProductQuery::new(&self.filter, &self.cursor),
        };
        (self, ticket)
    }

    /// Publish a page fetched for `seq`. Returns `false`, leaving the state
    /// untouched, when a newer query has been issued since.
    pub fn publish_page(mut self, seq: u64, page: ProductPage) -> (Self, bool) {
        if seq != self.query_seq {
            return (self, false);
        }
        self.categories = page.categories();
        self.page = page;
        (self, true)
    }

    /// Publish the failure of the query `seq`: empty page, no categories
    pub fn publish_failure(self, seq: u64) -> (Self, bool) {
        self.publish_page(seq, ProductPage::empty())
    }

    pub fn issue_metrics(mut self) -> (Self, u64) {
        self.metrics_seq += 1;
        let seq = self.metrics_seq;
        (self, seq)
    }

    /// Publish the rows of metrics cycle `seq` if it is still the latest
    pub fn publish_metrics(mut self, seq: u64, rows: Vec<CategoryMetric>) -> (Self, bool) {
        if seq != self.metrics_seq {
            return (self, false);
        }
        self.metrics = rows;
        (self, true)
    }

    /// Apply a patch to the published page. `None` undo means the row the
    /// patch targets is not on the page and nothing changed.
    pub fn apply(mut self, patch: Patch) -> (Self, Option<Undo>) {
        let undo = match patch {
            Patch::SetStock { id, quantity } => self.page.find_mut(id).map(|row| {
                let previous = row.stock_quantity;
                row.stock_quantity = quantity;
                Undo::Stock { id, previous }
            }),
            Patch::Replace { id, product } => self.page.find_mut(id).map(|row| {
                let previous = std::mem::replace(row, product);
                Undo::Row { id, previous }
            }),
            Patch::Remove { id } => self.page.position(id).map(|index| {
                let product = self.page.products.remove(index);
                self.page.total_elements = self.page.total_elements.saturating_sub(1);
                Undo::Removed { index, product }
            }),
            Patch::Append { product } => {
                self.page.products.push(product.clone());
                self.page.total_elements += 1;
                Some(Undo::Appended { product })
            }
        };
        (self, undo)
    }

    /// Take back one patch. Only the patched row or field is restored;
    /// a row that has since left the page is not brought back.
    pub fn rollback(mut self, undo: Undo) -> Self {
        match undo {
            Undo::Stock { id, previous } => {
                if let Some(row) = self.page.find_mut(id) {
                    row.stock_quantity = previous;
                }
            }
            Undo::Row { id, previous } => {
                if let Some(row) = self.page.find_mut(id) {
                    *row = previous;
                }
            }
            Undo::Removed { index, product } => {
                let still_gone = product.id.is_none_or(|id| self.page.find(id).is_none());
                if still_gone {
                    let index = index.min(self.page.products.len());
                    self.page.products.insert(index, product);
                    self.page.total_elements += 1;
                }
            }
            Undo::Appended { product } => {
                let position = self
                    .page
                    .products
                    .iter()
                    .position(|p| p.id.is_none() && *p == product);
                if let Some(index) = position {
                    self.page.products.remove(index);
                    self.page.total_elements = self.page.total_elements.saturating_sub(1);
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Availability, Decimal};

    fn product(id: i64, category: &str, stock: i64) -> Product {
        Product::new(format!("item-{id}"), category, Decimal::ONE, stock).with_id(id)
    }

    fn loaded() -> AppState {
        let (state, ticket) = AppState::default().issue_query();
        let page = ProductPage::new(
            vec![product(1, "Dairy", 5), product(123, "Bakery", 7), product(3, "Dairy", 0)],
            23,
        );
        state.publish_page(ticket.seq, page).0
    }

    #[test]
    fn test_filter_change_resets_page() {
        let state = AppState::default().with_cursor(PaginationCursor::default().with_page(4));
        let state = state.with_filter(FilterCriteria::new("milk", Vec::new(), Availability::All));
        assert_eq!(state.cursor.page, 0);
        assert_eq!(state.filter.name, "milk");

        // the same filter resubmitted still lands on page 0
        let cursor = state.cursor.with_page(2);
        let state = state.with_cursor(cursor);
        let filter = state.filter.clone();
        assert_eq!(state.with_filter(filter).cursor.page, 0);
    }

    #[test]
    fn test_superseded_query_is_not_published() {
        let (state, first) = AppState::default().issue_query();
        let (state, second) = state.issue_query();
        assert!(second.seq > first.seq);

        let (state, published) =
            state.publish_page(first.seq, ProductPage::new(vec![product(9, "Old", 1)], 1));
        assert!(!published);
        assert!(state.page.is_empty());

        let (state, published) =
            state.publish_page(second.seq, ProductPage::new(vec![product(1, "New", 1)], 1));
        assert!(published);
        assert_eq!(state.categories, vec!["New"]);
    }

    #[test]
    fn test_failure_clears_page_and_categories() {
        let (state, ticket) = loaded().issue_query();
        let (state, published) = state.publish_failure(ticket.seq);
        assert!(published);
        assert_eq!(state.page, ProductPage::empty());
        assert!(state.categories.is_empty());
    }

    #[test]
    fn test_categories_come_from_current_page_only() {
        let state = loaded();
        assert_eq!(state.categories, vec!["Dairy", "Bakery"]);

        let (state, ticket) = state.issue_query();
        let (state, _) = state.publish_page(
            ticket.seq,
            ProductPage::new(vec![product(40, "Frozen Foods", 2)], 23),
        );
        assert_eq!(state.categories, vec!["Frozen Foods"]);
    }

    #[test]
    fn test_stale_metrics_cycle_is_dropped() {
        let (state, first) = AppState::default().issue_metrics();
        let (state, second) = state.issue_metrics();
        let rows = vec![shared::CategoryMetric::overall(&[], Decimal::ONE)];

        let (state, published) = state.publish_metrics(first, rows.clone());
        assert!(!published);
        assert!(state.metrics.is_empty());

        let (state, published) = state.publish_metrics(second, rows.clone());
        assert!(published);
        assert_eq!(state.metrics, rows);
    }

    #[test]
    fn test_stock_patch_and_rollback() {
        let (state, undo) = loaded().apply(Patch::SetStock { id: 123, quantity: 0 });
        assert_eq!(state.page.find(123).unwrap().stock_quantity, 0);

        let state = state.rollback(undo.unwrap());
        assert_eq!(state.page.find(123).unwrap().stock_quantity, 7);
    }

    #[test]
    fn test_patch_on_missing_row_changes_nothing() {
        let before = loaded();
        let (after, undo) = before.clone().apply(Patch::Remove { id: 999 });
        assert!(undo.is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn test_rollback_only_touches_patched_row() {
        let (state, undo) = loaded().apply(Patch::SetStock { id: 123, quantity: 0 });
        let (state, _) = state.apply(Patch::SetStock { id: 1, quantity: 50 });

        let state = state.rollback(undo.unwrap());
        assert_eq!(state.page.find(123).unwrap().stock_quantity, 7);
        assert_eq!(state.page.find(1).unwrap().stock_quantity, 50);
    }

    #[test]
    fn test_remove_and_restore_position() {
        let (state, undo) = loaded().apply(Patch::Remove { id: 123 });
        assert!(state.page.find(123).is_none());
        assert_eq!(state.page.total_elements, 22);

        let state = state.rollback(undo.unwrap());
        assert_eq!(state.page.position(123), Some(1));
        assert_eq!(state.page.total_elements, 23);
    }

    #[test]
    fn test_append_and_take_back() {
        let unsaved = Product::new("Butter", "Dairy", Decimal::new(350, 2), 12);
        let (state, undo) = loaded().apply(Patch::Append {
            product: unsaved.clone(),
        });
        assert_eq!(state.page.len(), 4);
        assert_eq!(state.page.total_elements, 24);

        let state = state.rollback(undo.unwrap());
        assert_eq!(state.page.len(), 3);
        assert_eq!(state.page.total_elements, 23);
    }

    #[test]
    fn test_replace_keeps_untouched_fields() {
        let mut edited = loaded().page.find(1).cloned().unwrap();
        edited.name = "Renamed".to_string();

        let (state, undo) = loaded().apply(Patch::Replace {
            id: 1,
            product: edited.clone(),
        });
        assert_eq!(state.page.find(1), Some(&edited));

        let state = state.rollback(undo.unwrap());
        assert_eq!(state.page.find(1).unwrap().name, "item-1");
    }
}
