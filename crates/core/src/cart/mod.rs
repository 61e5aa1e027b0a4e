//! The customer ordering cart.
//!
//! Two pieces: line identity ([`signature`]) decides when an addition merges
//! into an existing line, and the aggregate ([`aggregate`]) owns the ordered
//! entries and their derived totals.

pub mod aggregate;
pub mod signature;

pub use aggregate::{CartAggregate, CartEntry, CartTotals};
pub use signature::LineSignature;

use crate::types::SelectedOption;

/// Canonicalize an option selection: sort by (group, name) and drop
/// duplicate identities, keeping the first occurrence.
///
/// Both the signature and the stored entry use this form, so "Rice then
/// Extra spicy" and "Extra spicy then Rice" are the same line. When two
/// options share a (group, name) pair but disagree on price, the
/// first-supplied price wins; identity never depends on price.
#[must_use]
pub fn canonical_options(mut options: Vec<SelectedOption>) -> Vec<SelectedOption> {
    options.sort_by(|a, b| a.identity().cmp(&b.identity()));
    options.dedup_by(|a, b| a.identity() == b.identity());
    options
}
