//! Kiosk mode route handlers.
//!
//! Explicit mode flips. The guard middleware re-evaluates on every
//! navigation, so a flip here takes effect on the very next request.

use axum::Json;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use mesa_core::KioskMode;

use crate::error::Result;
use crate::middleware::set_kiosk_mode;

/// Kiosk mode response body.
#[derive(Debug, Serialize)]
pub struct KioskModeView {
    pub mode: KioskMode,
}

/// Flip the session into kiosk mode.
#[instrument(skip(session))]
pub async fn enter(session: Session) -> Result<Json<KioskModeView>> {
    set_kiosk_mode(&session, KioskMode::Kiosk).await?;
    Ok(Json(KioskModeView {
        mode: KioskMode::Kiosk,
    }))
}

/// Flip the session back to personal mode.
#[instrument(skip(session))]
pub async fn exit(session: Session) -> Result<Json<KioskModeView>> {
    set_kiosk_mode(&session, KioskMode::Personal).await?;
    Ok(Json(KioskModeView {
        mode: KioskMode::Personal,
    }))
}
