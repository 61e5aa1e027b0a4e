//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-memory store)
//! 4. Kiosk guard (navigation allow-list enforcement)

pub mod kiosk;
pub mod session;

pub use kiosk::{clear_kiosk_mode, kiosk_guard_middleware, set_kiosk_mode};
pub use session::create_session_layer;
