//! Category metrics
//!
//! One cycle sends three requests per category plus one for the overall
//! average, all at once, and publishes only when every one of them
//! succeeded.

use super::*;
use futures::future::try_join_all;
use shared::CategoryMetric;
use stockroom_client::ClientResult;

/// Fetch the metrics rows for `categories`: one row per category in input
/// order with ids from 1, then the overall row.
pub async fn fetch_metrics(
    service: &dyn ProductService,
    categories: &[String],
) -> ClientResult<Vec<CategoryMetric>> {
    let per_category = categories.iter().map(|category| async move {
        let (total_stock, total_value, average_value) = tokio::try_join!(
            service.category_total_stock(category),
            service.category_total_value(category),
            service.category_average_value(category),
        )?;
        Ok::<_, stockroom_client::ClientError>((category, total_stock, total_value, average_value))
    });

    let (totals, overall_average) =
        tokio::try_join!(try_join_all(per_category), service.average_value())?;

    let mut rows: Vec<CategoryMetric> = totals
        .into_iter()
        .zip(1u32..)
        .map(
            |((category, total_stock, total_value, average_value), id)| CategoryMetric {
                id,
                category: category.clone(),
                total_stock,
                total_value,
                average_value,
            },
        )
        .collect();
    let overall = CategoryMetric::overall(&rows, overall_average);
    rows.push(overall);
    Ok(rows)
}

impl Console {
    /// Recompute and publish the metrics table for `categories`.
    ///
    /// A failed cycle keeps the previous rows; the error is only logged.
    /// Returns whether this cycle's rows were published.
    pub async fn refresh_metrics(&self, categories: Vec<String>) -> bool {
        let seq = self.transition(AppState::issue_metrics).await;
        tracing::debug!(seq, categories = categories.len(), "Fetching category metrics");

        match fetch_metrics(self.service.as_ref(), &categories).await {
            Ok(rows) => {
                let published = self
                    .transition(|state| state.publish_metrics(seq, rows))
                    .await;
                if published {
                    tracing::info!(seq, categories = categories.len(), "Published category metrics");
                } else {
                    tracing::debug!(seq, "Discarding superseded metrics");
                }
                published
            }
            Err(e) => {
                tracing::error!(seq, error = %e, "Metrics cycle failed, keeping previous rows");
                false
            }
        }
    }
}
