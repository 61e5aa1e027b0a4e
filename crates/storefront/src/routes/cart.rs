//! Cart route handlers.
//!
//! The cart aggregate lives in the session, one per customer, so all
//! mutations for a session are serialized by the request flow - there is
//! no cross-request contention on the aggregate itself. Every mutation
//! loads the aggregate, applies one `mesa-core` operation, and stores it
//! back.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use mesa_core::{CartAggregate, CartEntry, LineSignature, Price, SelectedOption};

use crate::catalog::OptionChoice;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{OrderReceipt, session_keys};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub signature: LineSignature,
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub options: Vec<OptionView>,
    pub unit_total: Price,
    pub line_total: Price,
}

/// Selected option display data.
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub group: String,
    pub name: String,
    pub price: Price,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub grand_total: Price,
}

impl From<&CartAggregate> for CartView {
    fn from(cart: &CartAggregate) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            item_count: totals.item_count,
            grand_total: totals.grand_total,
        }
    }
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            signature: entry.signature().clone(),
            product_id: entry.product().id().to_string(),
            name: entry.product().name().to_owned(),
            quantity: entry.quantity(),
            options: entry
                .options()
                .iter()
                .map(|option| OptionView {
                    group: option.group().to_owned(),
                    name: option.name().to_owned(),
                    price: option.price(),
                })
                .collect(),
            unit_total: entry.unit_total(),
            line_total: entry.line_total(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session's cart aggregate, defaulting to empty.
async fn get_cart(session: &Session) -> Result<CartAggregate> {
    Ok(session
        .get::<CartAggregate>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart aggregate back into the session.
async fn set_cart(session: &Session, cart: &CartAggregate) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default)]
    pub options: Vec<OptionChoice>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub signature: LineSignature,
    pub delta: i32,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub signature: LineSignature,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

/// Display cart contents.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = get_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Get cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCountView>> {
    let cart = get_cart(&session).await?;
    Ok(Json(CartCountView {
        count: cart.totals().item_count,
    }))
}

/// Add one unit of a product to the cart.
///
/// The product and option prices are resolved server-side from the catalog;
/// additions are gated on the cached store-availability value.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    if !state.availability().is_open() {
        return Err(AppError::StoreClosed);
    }

    let (product, options) = state
        .catalog()
        .resolve(&request.product_id, &request.options)?;

    let mut cart = get_cart(&session).await?;
    cart.add(product, options);
    set_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added item to cart",
        Some(&[("product_id", request.product_id.as_str())]),
    );

    Ok(Json(CartView::from(&cart)))
}

/// Adjust a cart line's quantity by a delta.
///
/// A resulting quantity of zero or below removes the line; an unknown
/// signature is a no-op, mirroring the aggregate's idempotent semantics.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.update_quantity(&request.signature, request.delta);
    set_cart(&session, &cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Remove a line from the cart. Idempotent.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.remove(&request.signature);
    set_cart(&session, &cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.clear();
    set_cart(&session, &cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Submit the cart as an order.
///
/// Produces an [`OrderReceipt`] snapshot for the checkout consumer, clears
/// the cart, and stores the receipt as the session's last order. Payment and
/// order persistence happen downstream of the receipt.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<Json<OrderReceipt>> {
    let mut cart = get_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    let receipt = OrderReceipt {
        id: Uuid::new_v4(),
        placed_at: Utc::now(),
        entries: cart.entries().to_vec(),
        totals: cart.totals(),
    };

    // Empty the cart before recording the receipt: a write failure in
    // between must not leave the session holding a completed order with the
    // same entries still in the cart, where a retry would re-submit them.
    cart.clear();
    set_cart(&session, &cart).await?;
    session.insert(session_keys::LAST_ORDER, &receipt).await?;

    add_breadcrumb(
        "checkout",
        "Order submitted",
        Some(&[("order_id", receipt.id.to_string().as_str())]),
    );

    Ok(Json(receipt))
}

/// Rebuild the cart from the session's last order.
///
/// Re-adds every line of the last receipt, subject to the same availability
/// gate as a fresh addition.
#[instrument(skip(state, session))]
pub async fn reorder(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartView>> {
    if !state.availability().is_open() {
        return Err(AppError::StoreClosed);
    }

    let receipt = session
        .get::<OrderReceipt>(session_keys::LAST_ORDER)
        .await?
        .ok_or_else(|| AppError::NotFound("no previous order".to_owned()))?;

    let mut cart = get_cart(&session).await?;
    for entry in &receipt.entries {
        let options: Vec<SelectedOption> = entry.options().to_vec();
        for _ in 0..entry.quantity() {
            cart.add(entry.product().clone(), options.clone());
        }
    }
    set_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}
