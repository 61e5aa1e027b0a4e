//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are `rust_decimal::Decimal` under the hood, so repeated cart
//! additions never accumulate binary floating-point drift. Negative amounts
//! are rejected at construction; once a [`Price`] exists it is known valid
//! and everything downstream (entries, totals) can treat arithmetic as
//! total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount was negative.
    #[error("price amount must not be negative, got {0}")]
    Negative(Decimal),
}

/// A non-negative monetary amount in the store's single currency.
///
/// The kiosk operates in one currency, so no currency code travels with the
/// amount; display formatting is fixed at two decimal places.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create a price from minor units (e.g. cents).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `minor_units` is below zero.
    pub fn from_minor_units(minor_units: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(minor_units, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Sum of this price and another. Non-negative inputs keep the result
    /// non-negative, so no re-validation is needed.
    #[must_use]
    pub fn plus(&self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| acc.plus(p))
    }
}
