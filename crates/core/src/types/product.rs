//! Storefront product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Category;
use super::id::ProductId;

/// A catalog product as shown to customers.
///
/// Products are immutable for the storefront's purposes; the catalog is
/// either a static seed materialized once or a page fetched from the
/// backend. `id` is unique within a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    /// Ordered image references; the first is the display image.
    pub images: Vec<String>,
    pub category: Category,
    /// Free-form collection tag ("Garden Dreams", "Everyday Luxe", ...).
    pub collection: String,
    pub description: String,
    pub details: Vec<String>,
    pub materials: Vec<String>,
    pub care_instructions: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    /// Average review rating, 0.0 through 5.0.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub reviews: u32,
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
}

impl Product {
    /// Discount percentage implied by `original_price`, if any.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        let original = self.original_price?;
        if original <= Decimal::ZERO || original <= self.price {
            return None;
        }
        Some(((original - self.price) / original * Decimal::from(100)).round())
    }
}
