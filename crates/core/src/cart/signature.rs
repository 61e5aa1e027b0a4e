//! Cart line identity.
//!
//! A [`LineSignature`] is a deterministic key derived from a product and its
//! chosen option set. Two additions with the same product and the same
//! (group, name) pairs produce the same signature regardless of the order
//! the options were picked in; any difference in product or option set
//! produces a different signature.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, SelectedOption};

use super::canonical_options;

/// Field separator inside one (group, name) pair.
const FIELD_SEP: char = '\u{1f}';
/// Separator between the product id and each option pair.
const PAIR_SEP: char = '\u{1e}';

/// Deterministic identity key for a cart line.
///
/// Opaque to callers; compare for equality, store in maps, serialize into
/// the session. The delimiters are ASCII control characters, which cannot
/// occur in catalog identifiers or menu text, so distinct inputs cannot
/// collide by concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSignature(String);

impl LineSignature {
    /// Compute the signature for a product and option selection.
    ///
    /// Pure and idempotent: no I/O, identical inputs always produce the
    /// identical key. Option order is irrelevant and duplicate (group, name)
    /// pairs are collapsed before hashing into the key. Option prices do
    /// not participate in identity.
    #[must_use]
    pub fn compute(product_id: &ProductId, options: &[SelectedOption]) -> Self {
        let canonical = canonical_options(options.to_vec());
        let mut key = product_id.as_str().to_owned();
        for option in &canonical {
            key.push(PAIR_SEP);
            key.push_str(option.group());
            key.push(FIELD_SEP);
            key.push_str(option.name());
        }
        Self(key)
    }

    /// The signature as an opaque string (for logging and wire transport).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LineSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn option(group: &str, name: &str) -> SelectedOption {
        SelectedOption::new(group, name, Decimal::ZERO).expect("valid option")
    }

    fn priced_option(group: &str, name: &str, minor_units: i64) -> SelectedOption {
        SelectedOption::new(group, name, Decimal::new(minor_units, 2)).expect("valid option")
    }

    #[test]
    fn test_order_insensitive() {
        let id = ProductId::new("pad-thai");
        let a = LineSignature::compute(&id, &[option("Side", "Rice"), option("Spice", "Hot")]);
        let b = LineSignature::compute(&id, &[option("Spice", "Hot"), option("Side", "Rice")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_product_differs() {
        let options = [option("Side", "Rice")];
        let a = LineSignature::compute(&ProductId::new("pad-thai"), &options);
        let b = LineSignature::compute(&ProductId::new("green-curry"), &options);
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_option_set_differs() {
        let id = ProductId::new("pad-thai");
        let a = LineSignature::compute(&id, &[option("Side", "Rice")]);
        let b = LineSignature::compute(&id, &[option("Side", "Noodles")]);
        let c = LineSignature::compute(&id, &[]);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_price_does_not_affect_identity() {
        let id = ProductId::new("pad-thai");
        let a = LineSignature::compute(&id, &[priced_option("Side", "Rice", 0)]);
        let b = LineSignature::compute(&id, &[priced_option("Side", "Rice", 500)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_identity_collapsed() {
        let id = ProductId::new("pad-thai");
        let once = LineSignature::compute(&id, &[option("Side", "Rice")]);
        let twice =
            LineSignature::compute(&id, &[option("Side", "Rice"), option("Side", "Rice")]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_group_name_boundary_not_ambiguous() {
        // ("AB", "C") and ("A", "BC") must not collide even though the
        // concatenated letters match.
        let id = ProductId::new("x");
        let a = LineSignature::compute(&id, &[option("AB", "C")]);
        let b = LineSignature::compute(&id, &[option("A", "BC")]);
        assert_ne!(a, b);
    }
}
