//! Middleware for the admin panel.
//!
//! Session layer configuration plus the route-guard extractors in [`guard`].

pub mod guard;

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ar_admin_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// In-memory is deliberate: the session record carries the operator's backend
/// access token, which must never be written to durable storage. A panel
/// restart drops every session; operators come back through the
/// silent-refresh path without re-entering credentials.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
