//! Store availability state.

use serde::{Deserialize, Serialize};

/// Point-in-time store availability, as published by the external
/// store-state source.
///
/// The ordering flow holds only an eventually-consistent cached copy of
/// this; the source of truth lives outside the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    /// Whether the store is currently accepting orders.
    pub is_open: bool,
    /// Optional estimated wait time for new orders, in minutes.
    pub estimated_wait_minutes: Option<u32>,
}

impl StoreState {
    /// An open store with no wait estimate.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            is_open: true,
            estimated_wait_minutes: None,
        }
    }

    /// A closed store.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            is_open: false,
            estimated_wait_minutes: None,
        }
    }

    /// Attach a wait estimate.
    #[must_use]
    pub const fn with_wait_minutes(mut self, minutes: u32) -> Self {
        self.estimated_wait_minutes = Some(minutes);
        self
    }
}
