//! Text rendering of the product and metrics tables
//!
//! Presentation only: these functions read the published rows and never
//! change them.

use std::fmt::Write;

use rust_decimal::RoundingStrategy;
use shared::{CategoryMetric, Decimal, Product};

use crate::state::AppState;

/// `$` prefix, two decimals, half away from zero
pub fn currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

fn product_row(product: &Product) -> [String; 6] {
    [
        product.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
        product.name.clone(),
        product.category.clone(),
        currency(product.unit_price),
        product.stock_quantity.to_string(),
        product
            .expiration_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    ]
}

fn metric_row(metric: &CategoryMetric) -> [String; 4] {
    [
        metric.category.clone(),
        metric.total_stock.to_string(),
        currency(metric.total_value),
        currency(metric.average_value),
    ]
}

/// Left-aligned columns, widths fitted to the content
fn table<const N: usize>(header: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let line = |out: &mut String, cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    };
    line(&mut out, &header);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        line(&mut out, &cells);
    }
    out
}

/// Product table plus a page footer
pub fn products_table(state: &AppState) -> String {
    let rows: Vec<_> = state.page.products.iter().map(product_row).collect();
    let mut out = table(
        ["Id", "Name", "Category", "Unit price", "Stock", "Expiration"],
        &rows,
    );
    let pages = state.page.page_count(state.cursor.page_size());
    let _ = writeln!(
        out,
        "Page {} of {} ({} products)",
        state.cursor.page + 1,
        pages.max(1),
        state.page.total_elements
    );
    out
}

pub fn metrics_table(metrics: &[CategoryMetric]) -> String {
    let rows: Vec<_> = metrics.iter().map(metric_row).collect();
    table(
        [
            "Categories",
            "Total products in stock",
            "Total value in stock",
            "Average price in stock",
        ],
        &rows,
    )
}
