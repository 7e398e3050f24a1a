//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. Each session
//! owns exactly one cart; the store's atomic read-modify-write serializes
//! operations on the same session's cart, and sessions never share state.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::TiendaConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tienda_session";

/// Session expiry on inactivity, in seconds (20 minutes).
const SESSION_EXPIRY_SECONDS: i64 = 20 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The session (and its cart) is invalidated after 20 minutes of inactivity;
/// the next read after that yields an empty cart, not an error.
#[must_use]
pub fn create_session_layer(
    store: PostgresStore,
    config: &TiendaConfig,
) -> SessionManagerLayer<PostgresStore> {
    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
