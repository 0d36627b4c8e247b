//! Product page types

use serde::{Deserialize, Serialize};

use super::Product;

/// Paged list response as returned by the product service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Zero-based page number
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// The page of products currently published to the table
///
/// Replaced wholesale by each successful query; only mutation handlers
/// patch it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Authoritative count from the server
    pub total_elements: u64,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, total_elements: u64) -> Self {
        Self {
            products,
            total_elements,
        }
    }

    /// Zero rows and zero total
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Number of pages at the given page size
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(page_size))
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == Some(id))
    }

    pub fn find_mut(&mut self, id: i64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == Some(id))
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.products.iter().position(|p| p.id == Some(id))
    }
}

impl From<PageResponse<Product>> for ProductPage {
    fn from(response: PageResponse<Product>) -> Self {
        Self::new(response.content, response.total_elements)
    }
}
