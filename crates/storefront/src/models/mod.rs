//! Session-held view state for the storefront.

pub mod session;

pub use session::session_keys;
