//! Tienda Austral Core - Shared types library.
//!
//! This crate provides common types used across all Tienda Austral components:
//! - `storefront` - Public catalog and checkout API
//! - `cli` - Command-line tools for seeding and store validation
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no file access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, SKUs, prices, emails,
//!   and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
