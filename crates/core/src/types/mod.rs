//! Core types for the Movies Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod movie;
pub mod price;

pub use id::*;
pub use movie::Movie;
pub use price::{CurrencyCode, Price};
