//! Checkout tests against a real session store.
//!
//! Drives the checkout handler directly with a standalone tower-sessions
//! session and asserts the session state it leaves behind: the cart must be
//! emptied and persisted before the receipt is recorded, so a partial write
//! can never leave a completed order alongside a still-full cart.

use std::sync::Arc;

use rust_decimal::Decimal;
use tower_sessions::{MemoryStore, Session};

use mesa_core::{CartAggregate, ProductId, ProductRef};
use mesa_storefront::error::AppError;
use mesa_storefront::models::{OrderReceipt, session_keys};
use mesa_storefront::routes::cart;

fn fresh_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

fn seeded_cart() -> CartAggregate {
    let mut cart = CartAggregate::new();
    let product = ProductRef::new(
        ProductId::new("green-curry"),
        "Green Curry",
        Decimal::new(8500, 2),
        None,
    )
    .expect("valid product");
    cart.add(product, vec![]);
    cart
}

#[tokio::test]
async fn test_checkout_empties_cart_and_records_receipt() {
    let session = fresh_session();
    session
        .insert(session_keys::CART, &seeded_cart())
        .await
        .expect("seed cart");

    let axum::Json(receipt) = cart::checkout(session.clone())
        .await
        .expect("checkout succeeds");
    assert_eq!(receipt.totals.item_count, 1);
    assert_eq!(receipt.totals.grand_total.amount(), Decimal::new(8500, 2));

    // The cart written back to the session is empty.
    let stored: CartAggregate = session
        .get(session_keys::CART)
        .await
        .expect("read cart")
        .expect("cart present");
    assert!(stored.is_empty());

    // And the receipt is the session's last order.
    let last: OrderReceipt = session
        .get(session_keys::LAST_ORDER)
        .await
        .expect("read last order")
        .expect("last order present");
    assert_eq!(last.id, receipt.id);
    assert_eq!(last.totals, receipt.totals);
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let session = fresh_session();
    let err = cart::checkout(session.clone())
        .await
        .expect_err("empty cart must not check out");
    assert!(matches!(err, AppError::BadRequest(_)));

    // Nothing was recorded.
    let last: Option<OrderReceipt> = session
        .get(session_keys::LAST_ORDER)
        .await
        .expect("read last order");
    assert!(last.is_none());
}
