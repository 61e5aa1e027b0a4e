//! Menu catalog: the read-only product source the cart snapshots from.
//!
//! The catalog is loaded once at startup from a JSON file. Cart additions
//! reference items by id plus chosen (group, name) pairs; prices are always
//! resolved here, server-side, so a client can never supply its own. What
//! the cart receives are [`ProductRef`]/[`SelectedOption`] snapshots - later
//! catalog edits never reach an in-progress order.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mesa_core::{ProductError, ProductId, ProductRef, SelectedOption};

/// Errors loading or resolving against the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The menu file could not be read.
    #[error("failed to read menu file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The menu file was not valid JSON for the expected shape.
    #[error("failed to parse menu file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// A menu item carried invalid data (negative price, blank name).
    #[error("invalid menu item {id}: {source}")]
    InvalidItem { id: String, source: ProductError },

    /// Duplicate item id within one menu file.
    #[error("duplicate menu item id: {0}")]
    DuplicateItem(String),

    /// A cart addition referenced an unknown product.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// A cart addition referenced an option the product does not offer.
    #[error("unknown option {name} in group {group}")]
    UnknownOption { group: String, name: String },
}

/// One selectable option within a group, as listed on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOption {
    pub name: String,
    /// Surcharge on top of the item's base price. May be zero.
    pub price: Decimal,
}

/// A named group of options (e.g. "Side", "Spice level").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOptionGroup {
    pub group: String,
    pub options: Vec<MenuOption>,
}

/// One sellable menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub base_price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub option_groups: Vec<MenuOptionGroup>,
}

/// A (group, name) pair naming one option the customer picked.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionChoice {
    pub group: String,
    pub name: String,
}

/// In-memory menu catalog with id lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a JSON menu file.
    ///
    /// Every item is validated up front (via a trial snapshot) so malformed
    /// menu data fails at startup, not mid-order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for unreadable or malformed menu files.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let items: Vec<MenuItem> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_items(items)
    }

    /// Build a catalog from already-parsed items (used by tests).
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for duplicate ids or invalid item data.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
            // Trial snapshot: surfaces negative prices and blank names now.
            snapshot_product(item)?;
            for group in &item.option_groups {
                for option in &group.options {
                    SelectedOption::new(group.group.clone(), option.name.clone(), option.price)
                        .map_err(|source| CatalogError::InvalidItem {
                            id: item.id.clone(),
                            source,
                        })?;
                }
            }
        }
        Ok(Self { items, by_id })
    }

    /// All menu items, in menu order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up a menu item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.by_id.get(id).and_then(|&index| self.items.get(index))
    }

    /// Resolve a cart addition into validated snapshots.
    ///
    /// Option prices come from the menu, keyed by the (group, name) pairs
    /// the customer chose; the caller's request carries no prices at all.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnknownProduct`] or [`CatalogError::UnknownOption`]
    /// when the request names something the menu does not offer.
    pub fn resolve(
        &self,
        product_id: &str,
        choices: &[OptionChoice],
    ) -> Result<(ProductRef, Vec<SelectedOption>), CatalogError> {
        let item = self
            .get(product_id)
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_owned()))?;
        let product = snapshot_product(item)?;

        let mut options = Vec::with_capacity(choices.len());
        for choice in choices {
            let menu_option = item
                .option_groups
                .iter()
                .find(|g| g.group == choice.group)
                .and_then(|g| g.options.iter().find(|o| o.name == choice.name))
                .ok_or_else(|| CatalogError::UnknownOption {
                    group: choice.group.clone(),
                    name: choice.name.clone(),
                })?;
            options.push(
                SelectedOption::new(
                    choice.group.clone(),
                    choice.name.clone(),
                    menu_option.price,
                )
                .map_err(|source| CatalogError::InvalidItem {
                    id: item.id.clone(),
                    source,
                })?,
            );
        }
        Ok((product, options))
    }
}

fn snapshot_product(item: &MenuItem) -> Result<ProductRef, CatalogError> {
    ProductRef::new(
        ProductId::new(item.id.clone()),
        item.name.clone(),
        item.base_price,
        item.image_url.clone(),
    )
    .map_err(|source| CatalogError::InvalidItem {
        id: item.id.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<MenuItem> {
        vec![
            MenuItem {
                id: "pad-thai".to_owned(),
                name: "Pad Thai".to_owned(),
                base_price: Decimal::new(6000, 2),
                image_url: None,
                option_groups: vec![MenuOptionGroup {
                    group: "Side".to_owned(),
                    options: vec![
                        MenuOption {
                            name: "Rice".to_owned(),
                            price: Decimal::ZERO,
                        },
                        MenuOption {
                            name: "Spring rolls".to_owned(),
                            price: Decimal::new(500, 2),
                        },
                    ],
                }],
            },
            MenuItem {
                id: "green-curry".to_owned(),
                name: "Green Curry".to_owned(),
                base_price: Decimal::new(8500, 2),
                image_url: None,
                option_groups: vec![],
            },
        ]
    }

    fn catalog() -> Catalog {
        Catalog::from_items(sample_items()).expect("valid catalog")
    }

    #[test]
    fn test_resolve_uses_menu_prices() {
        let (product, options) = catalog()
            .resolve(
                "pad-thai",
                &[OptionChoice {
                    group: "Side".to_owned(),
                    name: "Spring rolls".to_owned(),
                }],
            )
            .expect("resolves");
        assert_eq!(product.base_price().amount(), Decimal::new(6000, 2));
        assert_eq!(
            options.first().map(|o| o.price().amount()),
            Some(Decimal::new(500, 2))
        );
    }

    #[test]
    fn test_unknown_product_rejected() {
        let err = catalog()
            .resolve("nope", &[])
            .expect_err("unknown product must fail");
        assert!(matches!(err, CatalogError::UnknownProduct(id) if id == "nope"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = catalog()
            .resolve(
                "pad-thai",
                &[OptionChoice {
                    group: "Side".to_owned(),
                    name: "Fries".to_owned(),
                }],
            )
            .expect_err("unknown option must fail");
        assert!(matches!(err, CatalogError::UnknownOption { .. }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut items = sample_items();
        items.push(items.first().expect("non-empty").clone());
        assert!(matches!(
            Catalog::from_items(items),
            Err(CatalogError::DuplicateItem(_))
        ));
    }

    #[test]
    fn test_negative_menu_price_rejected_at_load() {
        let mut items = sample_items();
        if let Some(item) = items.first_mut() {
            item.base_price = Decimal::new(-100, 2);
        }
        assert!(matches!(
            Catalog::from_items(items),
            Err(CatalogError::InvalidItem { .. })
        ));
    }
}
