//! List query types
//!
//! The pagination cursor and the derivation of `/api/products` query
//! parameters from filter criteria plus cursor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::{ValidationError, ValidationResult};
use crate::filter::FilterCriteria;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// Page sizes the table offers
pub const PAGE_SIZE_OPTIONS: [u32; 2] = [5, 10];

/// Accept only one of [`PAGE_SIZE_OPTIONS`]
pub fn offered_page_size(size: u32) -> ValidationResult<NonZeroU32> {
    if !PAGE_SIZE_OPTIONS.contains(&size) {
        return Err(ValidationError::UnsupportedPageSize {
            size,
            options: &PAGE_SIZE_OPTIONS,
        });
    }
    NonZeroU32::new(size).ok_or(ValidationError::ZeroPageSize)
}

/// Sortable product fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Id,
    Name,
    Category,
    UnitPrice,
    StockQuantity,
    ExpirationDate,
}

impl SortField {
    /// Field name as the server knows it
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::UnitPrice => "unitPrice",
            SortField::StockQuantity => "stockQuantity",
            SortField::ExpirationDate => "expirationDate",
        }
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "category" => Ok(SortField::Category),
            "unitprice" | "price" => Ok(SortField::UnitPrice),
            "stockquantity" | "stock" => Ok(SortField::StockQuantity),
            "expirationdate" | "expiration" => Ok(SortField::ExpirationDate),
            _ => Err(ValidationError::UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Single-field sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for Sort {
    type Err = ValidationError;

    /// Parse `field` or `field,asc|desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field, direction.trim()),
            None => (s, "asc"),
        };
        let field = field.parse()?;
        let direction = if direction.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else if direction.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            return Err(ValidationError::UnknownSortDirection(direction.to_string()));
        };
        Ok(Self { field, direction })
    }
}

/// Page index, page size and optional sort of the product table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    /// Zero-based page index
    pub page: u32,
    pub page_size: NonZeroU32,
    pub sort: Option<Sort>,
}

impl PaginationCursor {
    /// Cursor at page 0 with the given page size
    pub fn new(page_size: u32) -> ValidationResult<Self> {
        let page_size = NonZeroU32::new(page_size).ok_or(ValidationError::ZeroPageSize)?;
        Ok(Self {
            page: 0,
            page_size,
            sort: None,
        })
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    /// Back to the first page, keeping size and sort
    pub fn reset(mut self) -> Self {
        self.page = 0;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

/// The list request derived from filter criteria and cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub size: u32,
    pub name: Option<String>,
    pub categories: Vec<String>,
    pub in_stock: Option<bool>,
    pub sort: Option<Sort>,
}

impl ProductQuery {
    pub fn new(filter: &FilterCriteria, cursor: &PaginationCursor) -> Self {
        Self {
            page: cursor.page,
            size: cursor.page_size(),
            name: Some(filter.name.clone()).filter(|n| !n.is_empty()),
            categories: filter.categories.clone(),
            in_stock: filter.availability.in_stock_param(),
            sort: cursor.sort,
        }
    }

    /// Query parameters in wire order. Unset filters produce no parameter;
    /// each category becomes its own `category` entry.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        for category in &self.categories {
            pairs.push(("category", category.clone()));
        }
        if let Some(in_stock) = self.in_stock {
            pairs.push(("inStock", in_stock.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        pairs
    }
}
