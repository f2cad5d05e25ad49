//! External service clients for the storefront.
//!
//! # Services
//!
//! - `purchases` - Purchase logging (write-only record of completed checkouts)

pub mod purchases;

pub use purchases::{PurchaseLogClient, PurchaseLogError, PurchaseRecord};
