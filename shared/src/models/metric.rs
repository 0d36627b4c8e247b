//! Category metrics Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label of the synthetic row that aggregates every category
pub const OVERALL_CATEGORY: &str = "Overall";

/// One row of the metrics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetric {
    /// 1-based row id; the overall row comes last
    pub id: u32,
    pub category: String,
    pub total_stock: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    /// Average unit price in stock
    #[serde(with = "rust_decimal::serde::float")]
    pub average_value: Decimal,
}

impl CategoryMetric {
    /// Build the overall row from the per-category rows.
    ///
    /// Stock and value are summed; the average is the server's figure, since
    /// averaging per-category averages weights categories equally.
    pub fn overall(rows: &[CategoryMetric], average_value: Decimal) -> Self {
        Self {
            id: rows.len() as u32 + 1,
            category: OVERALL_CATEGORY.to_string(),
            total_stock: rows.iter().map(|r| r.total_stock).sum(),
            total_value: rows.iter().map(|r| r.total_value).sum(),
            average_value,
        }
    }
}
