//! Mesa Core - domain types and ordering logic.
//!
//! This crate provides the types and pure logic shared across all Mesa
//! components:
//! - `storefront` - Kiosk/online ordering site
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! sessions, no HTTP. Everything here is synchronous and deterministic,
//! which keeps the cart and guard logic unit-testable without a server.
//!
//! # Modules
//!
//! - [`types`] - Validated value types: prices, product snapshots, store state
//! - [`cart`] - Cart line identity and the cart aggregate
//! - [`kiosk`] - Kiosk-mode navigation guard decision logic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod kiosk;
pub mod types;

pub use cart::{CartAggregate, CartEntry, CartTotals, LineSignature};
pub use kiosk::{KioskGuard, KioskMode};
pub use types::*;
