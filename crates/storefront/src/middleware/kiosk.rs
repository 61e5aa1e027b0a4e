//! Kiosk-mode navigation guard middleware.
//!
//! Runs on every request. The session's kiosk flag is set once, from the
//! first route the session touches, and from then on the pure
//! `KioskGuard::decide` function is re-evaluated against every navigation:
//! a kiosk session straying off the allow-list is redirected back to the
//! kiosk entry route. The decision logic lives in `mesa-core`; this layer
//! only performs the session read and the redirect.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use mesa_core::KioskMode;

use crate::models::session_keys;
use crate::state::AppState;

/// Enforce the kiosk navigation allow-list on every request.
pub async fn kiosk_guard_middleware(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let guard = state.kiosk_guard();

    let mode = match session.get::<KioskMode>(session_keys::KIOSK_MODE).await {
        Ok(Some(mode)) => mode,
        Ok(None) => {
            // First navigation of the session picks the starting mode.
            let mode = guard.initial_mode(&path);
            if let Err(e) = session.insert(session_keys::KIOSK_MODE, mode).await {
                tracing::error!("Failed to store kiosk mode in session: {e}");
            }
            mode
        }
        Err(e) => {
            tracing::error!("Failed to read kiosk mode from session: {e}");
            KioskMode::Personal
        }
    };

    if let Some(target) = guard.decide(&path, mode) {
        tracing::debug!(%path, redirect = %target, "kiosk guard redirect");
        return Redirect::to(target).into_response();
    }

    next.run(request).await
}

/// Explicitly flip the session into the given mode (e.g. entering a
/// kiosk checkout flow). Takes effect on the next navigation.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_kiosk_mode(
    session: &Session,
    mode: KioskMode,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::KIOSK_MODE, mode).await
}

/// Drop the stored mode; the next navigation re-derives it from its path.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_kiosk_mode(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<KioskMode>(session_keys::KIOSK_MODE).await?;
    Ok(())
}
