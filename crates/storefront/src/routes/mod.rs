//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Menu
//! GET  /api/menu               - Menu items plus current store state
//!
//! # Cart (session-backed)
//! GET  /api/cart               - Cart contents and totals
//! GET  /api/cart/count         - Item count badge
//! POST /api/cart/items         - Add one unit of a product + options
//! POST /api/cart/update        - Adjust a line's quantity by a delta
//! POST /api/cart/remove        - Remove a line
//! POST /api/cart/clear         - Empty the cart
//! POST /api/cart/reorder       - Rebuild the cart from the last order
//!
//! # Checkout
//! POST /api/checkout           - Submit the cart, producing an order receipt
//!
//! # Store availability
//! GET  /api/store/status       - Cached store state + channel status
//! PUT  /api/store/status       - Write through to the store-state source
//!
//! # Kiosk mode
//! POST /api/kiosk/enter        - Flip the session into kiosk mode
//! POST /api/kiosk/exit         - Flip the session back to personal mode
//! ```

pub mod cart;
pub mod kiosk;
pub mod menu;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/items", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/reorder", post(cart::reorder))
}

/// Create the store availability routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new().route("/status", get(store::status).put(store::set_status))
}

/// Create the kiosk mode routes router.
pub fn kiosk_routes() -> Router<AppState> {
    Router::new()
        .route("/enter", post(kiosk::enter))
        .route("/exit", post(kiosk::exit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(menu::show))
        .nest("/api/cart", cart_routes())
        .route("/api/checkout", post(cart::checkout))
        .nest("/api/store", store_routes())
        .nest("/api/kiosk", kiosk_routes())
}
