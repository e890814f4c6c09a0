//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only, when a DSN is configured)
//! 2. `TraceLayer` (request spans)
//! 3. Session layer (tower-sessions)
//! 4. `require_auth` route layer on the protected route group

pub mod auth;
pub mod session;

pub use auth::{LOGIN_PATH, OptionalAuth, require_auth};
pub use session::{
    SESSION_COOKIE_NAME, SessionError, SessionToken, create_session_layer, current_user, destroy,
    establish,
};
