//! Search filter types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Label the search bar uses for "no category restriction"
const ALL_LABEL: &str = "All";

/// Stock availability filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl Availability {
    /// Value of the `inStock` query parameter, `None` when not filtering
    pub fn in_stock_param(&self) -> Option<bool> {
        match self {
            Availability::All => None,
            Availability::InStock => Some(true),
            Availability::OutOfStock => Some(false),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::All => "All",
            Availability::InStock => "In stock",
            Availability::OutOfStock => "Out of stock",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Availability {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "all" => Ok(Availability::All),
            "in stock" => Ok(Availability::InStock),
            "out of stock" => Ok(Availability::OutOfStock),
            _ => Err(ValidationError::UnknownAvailability(s.to_string())),
        }
    }
}

/// Current search filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Substring match on product name, empty = no filter
    pub name: String,
    /// Allowed categories, empty = all
    pub categories: Vec<String>,
    pub availability: Availability,
}

impl FilterCriteria {
    pub fn new(
        name: impl Into<String>,
        categories: Vec<String>,
        availability: Availability,
    ) -> Self {
        Self {
            name: name.into(),
            categories,
            availability,
        }
    }

    /// Build criteria from a search-bar submission.
    ///
    /// A selection that contains `All` means no category restriction, and
    /// blank or repeated category entries are dropped.
    pub fn from_selection<I, S>(name: &str, categories: I, availability: Availability) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for category in categories {
            let category = category.into();
            if category == ALL_LABEL {
                return Self::new(name, Vec::new(), availability);
            }
            if !category.trim().is_empty() && !selected.contains(&category) {
                selected.push(category);
            }
        }
        Self::new(name, selected, availability)
    }
}
