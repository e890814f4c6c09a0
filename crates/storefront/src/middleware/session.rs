//! Session management.
//!
//! Sessions are handled by tower-sessions. The backing store is anything
//! implementing [`SessionStore`]: `PostgreSQL` in production, the in-memory
//! store in tests. A session moves `Anonymous -> Authenticated` when
//! [`establish`] stores a [`CurrentUser`] in it and ends when [`destroy`]
//! flushes it. There is no way back to anonymous within the same session.

use std::fmt;

use thiserror::Error;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;
use crate::models::{CurrentUser, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "wardrobe_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Store(#[from] tower_sessions::session::Error),

    #[error("session was saved without an id")]
    MissingId,
}

/// Opaque identifier of an authenticated session, as carried in the cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Create the session layer over `store`.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &StorefrontConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Mark `session` as authenticated for `user`.
///
/// The session id is cycled first so a token issued before login cannot be
/// reused afterwards. The session is saved immediately so the returned token
/// is the one the response cookie will carry.
///
/// # Errors
///
/// Returns `SessionError` if the store rejects the write.
pub async fn establish(session: &Session, user: &CurrentUser) -> Result<SessionToken, SessionError> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await?;
    session.save().await?;

    session
        .id()
        .map(|id| SessionToken(id.to_string()))
        .ok_or(SessionError::MissingId)
}

/// The authenticated user, if any.
///
/// A session that cannot be read is treated as anonymous.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    match session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable session, treating as anonymous");
            None
        }
    }
}

/// Destroy the session. Destroying a session that no longer exists succeeds.
///
/// # Errors
///
/// Returns `SessionError` if the store fails to delete the record.
pub async fn destroy(session: &Session) -> Result<(), SessionError> {
    session.flush().await?;
    Ok(())
}
