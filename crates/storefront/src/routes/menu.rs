//! Menu route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use mesa_core::StoreState;

use crate::catalog::MenuItem;
use crate::state::AppState;

/// Menu page data: the items plus the store state the UI gates on.
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub store: StoreState,
    pub items: Vec<MenuItem>,
}

/// Display the menu with the current store availability.
///
/// The store state is the cached channel value - a synchronous read, never
/// a round trip to the source.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<MenuView> {
    Json(MenuView {
        store: state.availability().current(),
        items: state.catalog().items().to_vec(),
    })
}
