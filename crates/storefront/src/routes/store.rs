//! Store availability route handlers.
//!
//! `GET` reads the locally cached value; `PUT` writes through the
//! in-process store-state source, which notifies every subscribed channel.
//! In a multi-node deployment the PUT side would live with the external
//! source of truth instead.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mesa_core::StoreState;

use crate::services::ChannelStatus;
use crate::state::AppState;

/// Store status response: the cached state plus channel health.
#[derive(Debug, Serialize)]
pub struct StoreStatusView {
    pub is_open: bool,
    pub estimated_wait_minutes: Option<u32>,
    /// "live" when the channel tracks the source, "fallback" when it is
    /// running on the unknown-state default, "starting" before the first
    /// fetch resolves.
    pub channel: &'static str,
}

/// Store status update body.
#[derive(Debug, Deserialize)]
pub struct SetStoreStatusRequest {
    pub is_open: bool,
    #[serde(default)]
    pub estimated_wait_minutes: Option<u32>,
}

const fn channel_label(status: ChannelStatus) -> &'static str {
    match status {
        ChannelStatus::Starting => "starting",
        ChannelStatus::Live => "live",
        ChannelStatus::Fallback => "fallback",
    }
}

/// Read the cached store availability.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Json<StoreStatusView> {
    let current = state.availability().current();
    Json(StoreStatusView {
        is_open: current.is_open,
        estimated_wait_minutes: current.estimated_wait_minutes,
        channel: channel_label(state.availability().status()),
    })
}

/// Update the store availability at the source.
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    Json(request): Json<SetStoreStatusRequest>,
) -> Json<StoreState> {
    let updated = StoreState {
        is_open: request.is_open,
        estimated_wait_minutes: request.estimated_wait_minutes,
    };
    state.store_source().publish(updated);
    tracing::info!(is_open = updated.is_open, "store availability updated");
    Json(updated)
}
