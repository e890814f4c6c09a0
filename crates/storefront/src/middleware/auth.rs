//! Authorization gate and auth extractors.
//!
//! [`require_auth`] is applied as a route layer over the protected route
//! group, so the login check lives in one place instead of in each handler.

use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::session::current_user;
use crate::models::CurrentUser;

/// Where anonymous visitors to protected pages are sent.
pub const LOGIN_PATH: &str = "/login";

/// Middleware that lets only authenticated sessions through.
///
/// Anonymous requests are redirected to the login page. On success the [`CurrentUser`] is added to the request
/// extensions for the handler.
pub async fn require_auth(mut request: Request, next: Next) -> Response {
    let Some(session) = request.extensions().get::<Session>().cloned() else {
        tracing::error!("require_auth used without a session layer");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let Some(user) = current_user(&session).await else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Extractor that optionally gets the current user.
///
/// Never rejects; used by public pages to adapt the navigation.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.email),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl OptionalAuth {
    /// Email to show in the navigation bar.
    #[must_use]
    pub fn signed_in_as(&self) -> Option<String> {
        self.0.as_ref().map(|user| user.email.to_string())
    }
}

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}
