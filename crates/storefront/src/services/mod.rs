//! Background services for the storefront.

pub mod availability;

pub use availability::{
    AvailabilityHandle, ChannelStatus, InMemoryStoreSource, StoreStateSource, spawn_channel,
};
