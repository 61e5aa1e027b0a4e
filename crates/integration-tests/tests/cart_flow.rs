//! Integration tests for the cart ordering flow.
//!
//! Exercises the path a real add-to-cart request takes: resolve the
//! selection against the catalog, merge-or-insert into the aggregate, and
//! read the derived totals back.

use rust_decimal::Decimal;

use mesa_core::CartAggregate;
use mesa_storefront::catalog::{
    Catalog, MenuItem, MenuOption, MenuOptionGroup, OptionChoice,
};

fn menu() -> Catalog {
    Catalog::from_items(vec![
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
        MenuItem {
            id: "mango-sticky-rice".to_owned(),
            name: "Mango Sticky Rice".to_owned(),
            base_price: Decimal::new(3550, 2),
            image_url: None,
            option_groups: vec![],
        },
    ])
    .expect("valid menu")
}

fn choice(group: &str, name: &str) -> OptionChoice {
    OptionChoice {
        group: group.to_owned(),
        name: name.to_owned(),
    }
}

#[test]
fn test_resolve_then_add_merges_identical_selections() {
    let menu = menu();
    let mut cart = CartAggregate::new();

    for _ in 0..2 {
        let (product, options) = menu
            .resolve("pad-thai", &[choice("Side", "Rice")])
            .expect("resolves");
        cart.add(product, options);
    }
    let (product, options) = menu.resolve("green-curry", &[]).expect("resolves");
    cart.add(product, options);

    assert_eq!(cart.len(), 2);
    let first = cart.entries().first().expect("first entry");
    assert_eq!(first.quantity(), 2);
    assert_eq!(first.unit_total().amount(), Decimal::new(6000, 2));

    let totals = cart.totals();
    assert_eq!(totals.item_count, 3);
    assert_eq!(totals.grand_total.amount(), Decimal::new(20500, 2));
}

#[test]
fn test_option_surcharge_flows_into_unit_total() {
    let menu = menu();
    let mut cart = CartAggregate::new();

    let (product, options) = menu
        .resolve("pad-thai", &[choice("Side", "Spring rolls")])
        .expect("resolves");
    cart.add(product, options);

    let entry = cart.entries().first().expect("one entry");
    assert_eq!(entry.unit_total().amount(), Decimal::new(6500, 2));
}

#[test]
fn test_selection_order_does_not_fork_lines() {
    let menu = Catalog::from_items(vec![MenuItem {
        id: "combo".to_owned(),
        name: "Combo".to_owned(),
        base_price: Decimal::new(10_000, 2),
        image_url: None,
        option_groups: vec![
            MenuOptionGroup {
                group: "Side".to_owned(),
                options: vec![MenuOption {
                    name: "Rice".to_owned(),
                    price: Decimal::ZERO,
                }],
            },
            MenuOptionGroup {
                group: "Drink".to_owned(),
                options: vec![MenuOption {
                    name: "Tea".to_owned(),
                    price: Decimal::ZERO,
                }],
            },
        ],
    }])
    .expect("valid menu");

    let mut cart = CartAggregate::new();
    let (product, options) = menu
        .resolve("combo", &[choice("Side", "Rice"), choice("Drink", "Tea")])
        .expect("resolves");
    cart.add(product, options);
    let (product, options) = menu
        .resolve("combo", &[choice("Drink", "Tea"), choice("Side", "Rice")])
        .expect("resolves");
    cart.add(product, options);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.totals().item_count, 2);
}

#[test]
fn test_no_drift_across_hundred_additions() {
    let menu = menu();
    let mut cart = CartAggregate::new();

    for _ in 0..100 {
        let (product, options) = menu.resolve("mango-sticky-rice", &[]).expect("resolves");
        cart.add(product, options);
    }

    assert_eq!(cart.totals().grand_total.amount(), Decimal::new(355_000, 2));
}

#[test]
fn test_quantity_decrements_remove_at_zero() {
    let menu = menu();
    let mut cart = CartAggregate::new();

    let (product, options) = menu.resolve("green-curry", &[]).expect("resolves");
    let sig = cart.add(product, options);
    cart.update_quantity(&sig, 2);
    assert_eq!(cart.totals().item_count, 3);

    cart.update_quantity(&sig, -3);
    assert!(cart.is_empty());
    assert_eq!(cart.totals().item_count, 0);
    assert_eq!(cart.totals().grand_total.amount(), Decimal::ZERO);
}

#[test]
fn test_cart_survives_session_serialization() {
    // The storefront round-trips the aggregate through the session as JSON
    // on every request; a lossy round trip would corrupt orders.
    let menu = menu();
    let mut cart = CartAggregate::new();
    let (product, options) = menu
        .resolve("pad-thai", &[choice("Side", "Spring rolls")])
        .expect("resolves");
    cart.add(product, options);

    let json = serde_json::to_string(&cart).expect("serialize");
    let restored: CartAggregate = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored, cart);
    assert_eq!(restored.totals(), cart.totals());
    // Signatures must survive the round trip so follow-up updates still hit.
    let sig = cart
        .entries()
        .first()
        .expect("one entry")
        .signature()
        .clone();
    let mut restored = restored;
    restored.update_quantity(&sig, 1);
    assert_eq!(restored.totals().item_count, 2);
}
