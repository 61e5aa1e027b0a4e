//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with kiosk-friendly defaults:
//! - `MESA_HOST` - Bind address (default: 127.0.0.1)
//! - `MESA_PORT` - Listen port (default: 3000)
//! - `MESA_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `MESA_MENU_PATH` - Path to the JSON menu file (default: `crates/storefront/content/menu.json`)
//! - `MESA_KIOSK_ENTRY_ROUTE` - Route kiosk sessions are pinned to (default: `/kiosk`)
//! - `MESA_KIOSK_ALLOWED_PREFIXES` - Comma-separated route roots reachable in
//!   kiosk mode (default: `/kiosk,/api,/health`)
//! - `MESA_ASSUME_OPEN_WHEN_UNKNOWN` - Availability policy before the first
//!   store-state value arrives (default: true)
//! - `MESA_AVAILABILITY_FETCH_TIMEOUT_MS` - Bound on the initial store-state
//!   fetch before the unknown-state policy applies (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Path to the JSON menu file
    pub menu_path: String,
    /// Kiosk navigation policy
    pub kiosk: KioskConfig,
    /// Store-availability channel policy
    pub availability: AvailabilityConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Kiosk navigation guard configuration.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    /// Route kiosk sessions are redirected back to
    pub entry_route: String,
    /// Route roots reachable while in kiosk mode
    pub allowed_prefixes: Vec<String>,
}

/// Store-availability channel configuration.
#[derive(Debug, Clone)]
pub struct AvailabilityConfig {
    /// Whether an unknown store state counts as open (optimistic default)
    pub assume_open_when_unknown: bool,
    /// Bound on the initial point-in-time fetch
    pub initial_fetch_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a set variable fails to
    /// parse (unset variables fall back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = parse_or_default("MESA_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default("MESA_PORT", 3000)?;
        let base_url =
            std::env::var("MESA_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("MESA_BASE_URL".to_owned(), e.to_string())
        })?;

        let menu_path = std::env::var("MESA_MENU_PATH")
            .unwrap_or_else(|_| "crates/storefront/content/menu.json".to_owned());

        let entry_route =
            std::env::var("MESA_KIOSK_ENTRY_ROUTE").unwrap_or_else(|_| "/kiosk".to_owned());
        let allowed_prefixes = std::env::var("MESA_KIOSK_ALLOWED_PREFIXES")
            .unwrap_or_else(|_| "/kiosk,/api,/health".to_owned());
        let allowed_prefixes = parse_prefix_list(&allowed_prefixes);

        let assume_open_when_unknown = parse_or_default("MESA_ASSUME_OPEN_WHEN_UNKNOWN", true)?;
        let initial_fetch_timeout_ms: u64 =
            parse_or_default("MESA_AVAILABILITY_FETCH_TIMEOUT_MS", 2000)?;

        Ok(Self {
            host,
            port,
            base_url,
            menu_path,
            kiosk: KioskConfig {
                entry_route,
                allowed_prefixes,
            },
            availability: AvailabilityConfig {
                assume_open_when_unknown,
                initial_fetch_timeout: Duration::from_millis(initial_fetch_timeout_ms),
            },
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse an env var, falling back to a default when unset.
fn parse_or_default<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated prefix list, trimming whitespace and dropping
/// empty segments.
fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
