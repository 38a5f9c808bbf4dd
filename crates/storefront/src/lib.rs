//! Daisy Storefront library.
//!
//! Customer-facing state for the Daisy jewelry store:
//!
//! - [`catalog`] - Pure filter/sort engine over the product catalog and the
//!   static seed catalog
//! - [`cart`] - Cart store with variant-aware line merging and derived
//!   totals
//! - [`wishlist`] - Persisted set of liked products
//! - [`auth`] - Customer session store (login, signup, profile, restore)
//! - [`state`] - The aggregate of stores constructed once at application
//!   start
//!
//! The visual layer is not here; every type in this crate is UI-agnostic
//! state that a rendering shell reads and mutates through the exposed
//! operations.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod state;
pub mod wishlist;

pub use auth::{AuthError, AuthStore};
pub use cart::CartStore;
pub use catalog::CatalogQuery;
pub use state::AppState;
pub use wishlist::WishlistStore;
