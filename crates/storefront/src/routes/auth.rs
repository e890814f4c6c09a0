//! Authentication route handlers.
//!
//! Handles registration, login and logout against the local credential store.
//! Failures are reported as plain-text bodies through [`AppError`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, current_user};
use crate::models::Profile;
use crate::services::AuthError;
use crate::state::AppState;

/// Where a successful login or registration lands.
const LANDING_PATH: &str = "/index";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
///
/// Profile fields are free text and may be left out.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub ph_no: String,
}

impl RegisterForm {
    fn profile(&self) -> Profile {
        Profile {
            name: self.name.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            pincode: self.pincode.trim().to_owned(),
            state: self.state.trim().to_owned(),
            phone: self.ph_no.trim().to_owned(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub signed_in_as: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub signed_in_as: Option<String>,
}

/// Logout confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/logout.html")]
pub struct LogoutTemplate {
    pub signed_in_as: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(auth: OptionalAuth) -> impl IntoResponse {
    LoginTemplate {
        signed_in_as: auth.signed_in_as(),
    }
}

/// Handle login form submission.
///
/// Unknown emails, wrong passwords and unreadable forms all get the same
/// 401 body.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Redirect> {
    let Ok(Form(form)) = form else {
        tracing::warn!("Login failed: unreadable form");
        return Err(AuthError::InvalidCredentials.into());
    };

    match state
        .auth()
        .login(&session, &form.email, &form.password)
        .await
    {
        Ok(_token) => {
            if let Some(user) = current_user(&session).await {
                set_sentry_user(&user.id);
            }
            Ok(Redirect::to(LANDING_PATH))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            Err(AuthError::InvalidCredentials.into())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(auth: OptionalAuth) -> impl IntoResponse {
    RegisterTemplate {
        signed_in_as: auth.signed_in_as(),
    }
}

/// Handle registration form submission.
///
/// Creates the user, signs them in and sends them to the landing page.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    form: std::result::Result<Form<RegisterForm>, FormRejection>,
) -> Result<Redirect> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Registration rejected");
            return Err(AppError::BadRequest(
                "email and password are required".to_string(),
            ));
        }
    };
    let profile = form.profile();

    match state
        .auth()
        .register_and_login(&session, &form.email, &form.password, profile)
        .await
    {
        Ok(_token) => Ok(Redirect::to(LANDING_PATH)),
        Err(AuthError::Validation(msg)) => {
            tracing::warn!(reason = %msg, "Registration rejected");
            Err(AppError::BadRequest(msg))
        }
        Err(e) => Err(AppError::operation("Error registering user", e)),
    }
}

// =============================================================================
// Logout Routes
// =============================================================================

/// Display the logout confirmation page.
pub async fn logout_page(auth: OptionalAuth) -> impl IntoResponse {
    LogoutTemplate {
        signed_in_as: auth.signed_in_as(),
    }
}

/// Handle logout. Logging out without a session also succeeds.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<&'static str> {
    state
        .auth()
        .logout(&session)
        .await
        .map_err(|e| AppError::operation("Error logging out", e))?;

    clear_sentry_user();
    Ok("Logout successful!")
}
