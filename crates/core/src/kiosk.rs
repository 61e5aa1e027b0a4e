//! Kiosk-mode navigation guard.
//!
//! A session is either in `kiosk` mode (walk-up ordering terminal) or
//! `personal` mode (customer's own device). While in kiosk mode only a
//! fixed allow-list of route roots is reachable; anything else redirects
//! back to the kiosk entry route. Personal mode places no constraint.
//!
//! The decision itself is a pure function of (path, mode) so it can be unit
//! tested without HTTP; the storefront middleware performs the actual
//! redirect and re-evaluates on every navigation, so a mode flip mid-session
//! takes effect on the next request.

use serde::{Deserialize, Serialize};

/// Which route family the session is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KioskMode {
    /// Walk-up terminal: navigation restricted to the kiosk allow-list.
    Kiosk,
    /// Personal device: all routes reachable.
    Personal,
}

/// Navigation policy for kiosk sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskGuard {
    entry_route: String,
    allowed_prefixes: Vec<String>,
}

impl KioskGuard {
    /// Create a guard with an entry route and a fixed allow-list of route
    /// roots.
    ///
    /// The entry route is always considered allowed, whether or not it is
    /// listed, so a redirect can never loop.
    #[must_use]
    pub fn new(entry_route: impl Into<String>, mut allowed_prefixes: Vec<String>) -> Self {
        let entry_route = entry_route.into();
        if !allowed_prefixes.contains(&entry_route) {
            allowed_prefixes.push(entry_route.clone());
        }
        Self {
            entry_route,
            allowed_prefixes,
        }
    }

    /// The route a kiosk session is sent back to when it strays.
    #[must_use]
    pub fn entry_route(&self) -> &str {
        &self.entry_route
    }

    /// Starting mode for a session, from the first route it requested.
    ///
    /// Only the entry-route family marks a session as a kiosk terminal. The
    /// broader allow-list exists for navigation *within* kiosk mode; shared
    /// prefixes on it (an API root, a health endpoint) say nothing about
    /// which device the session came from.
    #[must_use]
    pub fn initial_mode(&self, path: &str) -> KioskMode {
        if path_has_prefix(path, &self.entry_route) {
            KioskMode::Kiosk
        } else {
            KioskMode::Personal
        }
    }

    /// Pure redirect decision: `Some(target)` if the navigation must be
    /// redirected, `None` if it may proceed.
    #[must_use]
    pub fn decide(&self, path: &str, mode: KioskMode) -> Option<&str> {
        match mode {
            KioskMode::Personal => None,
            KioskMode::Kiosk => {
                if self.is_allowed(path) {
                    None
                } else {
                    Some(self.entry_route())
                }
            }
        }
    }

    /// Boundary-aware prefix match against the allow-list: `/kiosk` matches
    /// `/kiosk` and `/kiosk/cart` but not `/kioskx`.
    fn is_allowed(&self, path: &str) -> bool {
        self.allowed_prefixes
            .iter()
            .any(|prefix| path_has_prefix(path, prefix))
    }
}

fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}
