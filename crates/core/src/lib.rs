//! Daisy Core - Shared types library.
//!
//! This crate provides common types used across all Daisy components:
//! - `client` - HTTP adapter and durable key-value storage
//! - `storefront` - Customer-facing catalog, cart, and wishlist state
//! - `admin` - Product management console state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, money
//!   formatting, catalog enums, products, cart lines, and session
//!   identities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
