//! Product and option snapshots as the cart sees them.
//!
//! A [`ProductRef`] is an immutable copy of a sellable item taken at the
//! moment of selection. The cart never holds a live reference into the
//! catalog, so catalog edits made while a customer is mid-order do not
//! retroactively change what they are about to pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::{Price, PriceError};

/// Error constructing a [`ProductRef`] or [`SelectedOption`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// A price field was invalid.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The display name was empty or whitespace.
    #[error("display name must not be empty")]
    EmptyName,
}

/// Immutable snapshot of a sellable item at the moment of selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    id: ProductId,
    name: String,
    base_price: Price,
    image_url: Option<String>,
}

impl ProductRef {
    /// Create a product snapshot, validating the base price.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::Price`] for a negative base price and
    /// [`ProductError::EmptyName`] for a blank display name.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        base_price: Decimal,
        image_url: Option<String>,
    ) -> Result<Self, ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            base_price: Price::new(base_price)?,
            image_url,
        })
    }

    /// The catalog identifier this snapshot was taken from.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// Customer-facing display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base price before option surcharges.
    #[must_use]
    pub const fn base_price(&self) -> Price {
        self.base_price
    }

    /// Optional image reference.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// One chosen modifier on a cart line: a (group, name) pair plus surcharge.
///
/// Line identity is defined by the (group, name) pair only; the price is
/// carried for total computation but never participates in identity (see
/// `cart::signature`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    group: String,
    name: String,
    price: Price,
}

impl SelectedOption {
    /// Create a selected option, validating the surcharge.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::Price`] for a negative surcharge and
    /// [`ProductError::EmptyName`] for a blank group or option name.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ProductError> {
        let group = group.into();
        let name = name.into();
        if group.trim().is_empty() || name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        Ok(Self {
            group,
            name,
            price: Price::new(price)?,
        })
    }

    /// The option group (e.g. "Side", "Spice level").
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The option name within its group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Additional price on top of the product base price. May be zero.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// The identity key of this option: its (group, name) pair.
    #[must_use]
    pub fn identity(&self) -> (&str, &str) {
        (&self.group, &self.name)
    }
}
