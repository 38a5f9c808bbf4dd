//! Cart line items and their identity key.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// Identity of a cart line: product plus the exact variant selection.
///
/// Two adds with the same product id but differing color or size produce
/// separate lines; an identical selection merges into one line. This makes
/// the at-most-one-line-per-selection invariant structural instead of
/// something every mutation has to remember.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl LineKey {
    /// Key for a product added without any variant selection.
    #[must_use]
    pub const fn product(product_id: ProductId) -> Self {
        Self {
            product_id,
            color: None,
            size: None,
        }
    }

    /// Key for a product with an explicit variant selection.
    #[must_use]
    pub const fn with_selection(
        product_id: ProductId,
        color: Option<String>,
        size: Option<String>,
    ) -> Self {
        Self {
            product_id,
            color,
            size,
        }
    }
}

/// A cart line: one product selection and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    /// Always positive; a zero quantity removes the line instead.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl CartItem {
    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id,
            color: self.selected_color.clone(),
            size: self.selected_size.clone(),
        }
    }

    /// Price of the line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::catalog::Category;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Piece {id}"),
            price: Decimal::from(price),
            original_price: None,
            images: vec![],
            category: Category::Rings,
            collection: "Everyday Luxe".to_owned(),
            description: String::new(),
            details: vec![],
            materials: vec![],
            care_instructions: vec![],
            is_new: false,
            is_bestseller: false,
            rating: 4.5,
            reviews: 10,
            in_stock: true,
            colors: None,
            sizes: None,
        }
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product: product(1, 275),
            quantity: 3,
            selected_color: None,
            selected_size: None,
        };
        assert_eq!(item.line_total(), Decimal::from(825));
    }

    #[test]
    fn test_key_distinguishes_selections() {
        let gold = CartItem {
            product: product(1, 275),
            quantity: 1,
            selected_color: Some("Gold".to_owned()),
            selected_size: None,
        };
        let silver = CartItem {
            product: product(1, 275),
            quantity: 1,
            selected_color: Some("Silver".to_owned()),
            selected_size: None,
        };
        assert_ne!(gold.key(), silver.key());
        assert_eq!(gold.key().product_id, silver.key().product_id);
    }

    #[test]
    fn test_plain_key_matches_unselected_item() {
        let item = CartItem {
            product: product(4, 100),
            quantity: 2,
            selected_color: None,
            selected_size: None,
        };
        assert_eq!(item.key(), LineKey::product(ProductId::new(4)));
    }
}
