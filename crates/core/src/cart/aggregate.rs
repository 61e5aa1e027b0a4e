//! The cart aggregate: ordered entries keyed by line signature.
//!
//! The aggregate is the single source of truth for "what the customer is
//! about to order". It is created empty at session start, mutated only
//! through the operations here, and cleared explicitly (checkout complete
//! or user action) - it never expires itself.
//!
//! All operations are total: on a well-formed aggregate nothing here can
//! fail. Malformed input (negative prices, blank names) is rejected earlier,
//! at `ProductRef`/`SelectedOption` construction. Operations naming an
//! absent signature are silent no-ops, so "remove something already
//! removed" is idempotent.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductRef, SelectedOption};

use super::canonical_options;
use super::signature::LineSignature;

/// One line in the cart: a product snapshot, its chosen options, and a
/// quantity.
///
/// Invariant: `quantity >= 1`. An entry whose quantity would drop to zero is
/// removed from the aggregate, never stored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    signature: LineSignature,
    product: ProductRef,
    quantity: u32,
    options: Vec<SelectedOption>,
}

impl CartEntry {
    fn new(product: ProductRef, options: Vec<SelectedOption>) -> Self {
        let options = canonical_options(options);
        let signature = LineSignature::compute(product.id(), &options);
        Self {
            signature,
            product,
            quantity: 1,
            options,
        }
    }

    /// The line's identity key.
    #[must_use]
    pub const fn signature(&self) -> &LineSignature {
        &self.signature
    }

    /// The product snapshot this line refers to.
    #[must_use]
    pub const fn product(&self) -> &ProductRef {
        &self.product
    }

    /// How many units of this line are in the cart. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The chosen options, in canonical (group, name) order.
    #[must_use]
    pub fn options(&self) -> &[SelectedOption] {
        &self.options
    }

    /// Price of a single unit: base price plus the sum of option surcharges.
    #[must_use]
    pub fn unit_total(&self) -> Price {
        self.options
            .iter()
            .map(SelectedOption::price)
            .fold(self.product.base_price(), |acc, p| acc.plus(p))
    }

    /// Price of the whole line: unit total times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_total().times(self.quantity)
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of quantities across all entries.
    pub item_count: u32,
    /// Sum of line totals across all entries.
    pub grand_total: Price,
}

impl CartTotals {
    /// Totals of an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            item_count: 0,
            grand_total: Price::zero(),
        }
    }
}

/// Ordered collection of cart entries, keyed by signature.
///
/// Signatures are unique within the aggregate; iteration order is insertion
/// order. Totals are computed lazily on read rather than cached, so there is
/// no cached value to drift out of sync with the entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAggregate {
    entries: Vec<CartEntry>,
}

impl CartAggregate {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of a product with the given options.
    ///
    /// If a line with the same signature already exists its quantity is
    /// incremented by one and its prices are left untouched; otherwise a new
    /// line with quantity 1 is appended. Returns the signature of the
    /// affected line.
    pub fn add(&mut self, product: ProductRef, options: Vec<SelectedOption>) -> LineSignature {
        let options = canonical_options(options);
        let signature = LineSignature::compute(product.id(), &options);
        if let Some(entry) = self.entry_mut(&signature) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry::new(product, options));
        }
        signature
    }

    /// Remove the line with the given signature. No-op if absent.
    pub fn remove(&mut self, signature: &LineSignature) {
        self.entries.retain(|entry| entry.signature() != signature);
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// A resulting quantity of zero or below removes the line entirely; an
    /// unknown signature is a silent no-op.
    pub fn update_quantity(&mut self, signature: &LineSignature, delta: i32) {
        let Some(entry) = self.entry_mut(signature) else {
            return;
        };
        let updated = i64::from(entry.quantity) + i64::from(delta);
        if updated <= 0 {
            self.remove(signature);
        } else {
            entry.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Item count and grand total, computed from the entries on every call.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.entries.iter().map(CartEntry::quantity).sum(),
            grand_total: self.entries.iter().map(CartEntry::line_total).sum(),
        }
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Look up a line by signature.
    #[must_use]
    pub fn get(&self, signature: &LineSignature) -> Option<&CartEntry> {
        self.entries
            .iter()
            .find(|entry| entry.signature() == signature)
    }

    /// Number of distinct lines (not the item count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, signature: &LineSignature) -> Option<&mut CartEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.signature() == signature)
    }
}
