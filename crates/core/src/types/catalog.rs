//! Catalog browsing enums: categories, collections, sort keys, price range.
//!
//! These types describe transient per-view filter state for the storefront
//! catalog. They are not persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storefront product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Earrings,
    Bracelets,
    Necklaces,
    Rings,
}

impl Category {
    /// All storefront categories, in display order.
    pub const ALL: [Self; 4] = [Self::Earrings, Self::Bracelets, Self::Necklaces, Self::Rings];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Earrings => write!(f, "Earrings"),
            Self::Bracelets => write!(f, "Bracelets"),
            Self::Necklaces => write!(f, "Necklaces"),
            Self::Rings => write!(f, "Rings"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Earrings" => Ok(Self::Earrings),
            "Bracelets" => Ok(Self::Bracelets),
            "Necklaces" => Ok(Self::Necklaces),
            "Rings" => Ok(Self::Rings),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// Category filter: a specific category or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => *c == category,
        }
    }
}

/// Collection filter: a named collection tag or everything.
///
/// Collections are free-form grouping tags ("Garden Dreams", "Everyday
/// Luxe"), so the filter carries a string rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollectionFilter {
    #[default]
    All,
    Named(String),
}

impl CollectionFilter {
    /// Whether a product tagged with `collection` passes this filter.
    #[must_use]
    pub fn matches(&self, collection: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == collection,
        }
    }
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Bestsellers first, otherwise catalog order.
    #[default]
    Featured,
    /// New arrivals first, otherwise catalog order.
    Newest,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
    /// Rating, high to low.
    Rating,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Featured => write!(f, "featured"),
            Self::Newest => write!(f, "newest"),
            Self::PriceAsc => write!(f, "price-asc"),
            Self::PriceDesc => write!(f, "price-desc"),
            Self::Rating => write!(f, "rating"),
        }
    }
}

/// Error constructing a [`PriceRange`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum RangeError {
    /// The lower bound exceeds the upper bound.
    #[error("price range minimum {min} exceeds maximum {max}")]
    Inverted { min: Decimal, max: Decimal },
}

/// A closed price interval `[min, max]`, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Create a price range.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Inverted`] if `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// The inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    /// The inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    /// Whether `price` falls inside the range (both ends inclusive).
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    /// The storefront's default browsing range.
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::from(1000),
        }
    }
}
