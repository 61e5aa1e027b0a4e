//! Application state shared across handlers.

use std::sync::Arc;

use mesa_core::KioskGuard;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::services::{AvailabilityHandle, InMemoryStoreSource, spawn_channel};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog, the availability channel, and
/// configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    kiosk_guard: KioskGuard,
    store_source: InMemoryStoreSource,
    availability: AvailabilityHandle,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the menu catalog and spawns the availability channel, so this
    /// must run inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu file cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(&config.menu_path)?;
        Self::with_catalog(config, catalog)
    }

    /// Create state around an already-built catalog (used by tests).
    ///
    /// # Errors
    ///
    /// Currently infallible but kept fallible to match [`AppState::new`].
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Result<Self, CatalogError> {
        let kiosk_guard = KioskGuard::new(
            config.kiosk.entry_route.clone(),
            config.kiosk.allowed_prefixes.clone(),
        );
        let store_source = InMemoryStoreSource::new(mesa_core::StoreState::open());
        let availability = spawn_channel(store_source.clone(), &config.availability);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                kiosk_guard,
                store_source,
                availability,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the kiosk navigation guard.
    #[must_use]
    pub fn kiosk_guard(&self) -> &KioskGuard {
        &self.inner.kiosk_guard
    }

    /// Get a reference to the store-state source of truth.
    #[must_use]
    pub fn store_source(&self) -> &InMemoryStoreSource {
        &self.inner.store_source
    }

    /// Get a reference to the availability read handle.
    #[must_use]
    pub fn availability(&self) -> &AvailabilityHandle {
        &self.inner.availability
    }
}
