//! Data models for the storefront.

pub mod session;

pub use session::{OrderReceipt, session_keys};
