//! Session-related types.
//!
//! Everything the storefront remembers about one customer lives in the
//! session: the cart aggregate, the kiosk-mode flag, and the last completed
//! order (kept for one-tap reorder). The session store owns lifetime and
//! expiry; the ordering core never expires anything itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mesa_core::{CartEntry, CartTotals};

/// Snapshot produced at checkout and handed to the checkout consumer.
///
/// Also stored in the session as the "last order" for reorder convenience -
/// a list of cart-entry-shaped records plus the totals they summed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Order identifier assigned at submission time.
    pub id: Uuid,
    /// When the order was submitted.
    pub placed_at: DateTime<Utc>,
    /// The cart lines as they were at submission.
    pub entries: Vec<CartEntry>,
    /// Item count and grand total at submission.
    pub totals: CartTotals,
}

/// Session keys for customer state.
pub mod session_keys {
    /// Key for the serialized cart aggregate.
    pub const CART: &str = "cart";

    /// Key for the kiosk-mode flag.
    pub const KIOSK_MODE: &str = "kiosk_mode";

    /// Key for the last completed order (reorder convenience).
    pub const LAST_ORDER: &str = "last_order";
}
