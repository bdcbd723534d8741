//! Session management.
//!
//! Sessions carry only two values: the admin flag and the authenticated
//! learner's id. Handlers read them and pass explicit identity values down;
//! nothing below the transport layer touches the session.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session key for the admin login flag.
pub const SESSION_ADMIN: &str = "logged_in";

/// Session key for the authenticated learner id.
pub const SESSION_LEARNER_ID: &str = "learner_id";

/// Default session expiry (24 hours).
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Create the session layer backed by the in-process store.
pub fn create_session_layer(same_site: SameSite) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_secure(false)
        .with_http_only(true) // Cookie not accessible via JavaScript
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            DEFAULT_SESSION_EXPIRY_HOURS,
        )))
}
