//! Product Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Product entity
///
/// Wire form is camelCase JSON as served by `/api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned id, `None` until created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub stock_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    /// Server-set, sent back untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    /// Server-set, sent back untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_date: Option<String>,
}

impl Product {
    /// Create an unsaved product
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Decimal,
        stock_quantity: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            unit_price,
            stock_quantity,
            expiration_date: None,
            creation_date: None,
            update_date: None,
        }
    }

    /// Set the expiration date
    pub fn with_expiration_date(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Set the server id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Check the submission rules: name and category present, unit price
    /// strictly positive, stock quantity not negative.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if self.unit_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(self.unit_price.to_string()));
        }
        if self.stock_quantity < 0 {
            return Err(ValidationError::NegativeStock(self.stock_quantity));
        }
        Ok(())
    }
}
