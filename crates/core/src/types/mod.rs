//! Core types for Daisy.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use cart::{CartItem, LineKey};
pub use catalog::{Category, CategoryFilter, CollectionFilter, PriceRange, RangeError, SortKey};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Currency, format_amount};
pub use product::Product;
pub use status::{Availability, BulkStatus};
pub use user::{AdminUser, User};
