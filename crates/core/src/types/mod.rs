//! Core types for Mesa.
//!
//! This module provides validated wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod store;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::{ProductError, ProductRef, SelectedOption};
pub use store::StoreState;
