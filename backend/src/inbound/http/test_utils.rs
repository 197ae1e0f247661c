//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    MemoryAccountRepository, MemoryJobRepository, MemoryNotificationRepository,
    MemoryPostRepository,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build an `HttpState` backed entirely by in-memory adapters.
pub fn memory_state() -> HttpState {
    HttpState::new(HttpStatePorts {
        accounts: Arc::new(MemoryAccountRepository::default()),
        posts: Arc::new(MemoryPostRepository::default()),
        jobs: Arc::new(MemoryJobRepository::default()),
        notifications: Arc::new(MemoryNotificationRepository::default()),
    })
}
