//! Movies Store Core - Shared types library.
//!
//! This crate provides common types used across the Movies Store components:
//! - `storefront` - Public-facing movie shop
//! - `integration-tests` - End-to-end tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   [`Movie`](types::Movie) catalog record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
