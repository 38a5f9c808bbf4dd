//! Product management: wire types, list controller, form controllers.

pub mod form;
pub mod list;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use daisy_core::{AdminProductId, Availability, Currency};

/// Admin category vocabulary accepted by the backend.
pub const CATEGORIES: [&str; 5] = ["necklace", "earrings", "bracelet", "ring", "other"];

/// A product as the admin backend reports it.
///
/// Distinct from the storefront [`daisy_core::Product`]: the console sees
/// the server-owned record with SKU, stock, status flags, and the nested
/// pricing block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProduct {
    #[serde(rename = "_id")]
    pub id: AdminProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub images: Vec<String>,
    pub stock: i64,
    pub availability: Availability,
    pub is_active: bool,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub quantity: i64,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pricing: ProductPricing,
}

/// Nested pricing block on an admin product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub discount_percentage: u32,
    #[serde(default)]
    pub currency: Currency,
}

/// One page of the admin product listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<AdminProduct>,
    pub total_pages: u32,
    pub total: u64,
}

/// Aggregate product statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: u64,
    pub active_products: u64,
    pub low_stock_products: u64,
    pub out_of_stock_products: u64,
    #[serde(default)]
    pub category_stats: Vec<BucketCount>,
    #[serde(default)]
    pub availability_stats: Vec<BucketCount>,
}

/// A labeled count inside the stats breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketCount {
    #[serde(rename = "_id")]
    pub label: String,
    pub count: u64,
}

/// Wrapper for the stats endpoint response: `{"stats": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatsResponse {
    pub stats: ProductStats,
}
