//! Informational page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub signed_in_as: Option<String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub signed_in_as: Option<String>,
}

/// Display the about page.
pub async fn about(auth: OptionalAuth) -> impl IntoResponse {
    AboutTemplate {
        signed_in_as: auth.signed_in_as(),
    }
}

/// Display the contact page.
pub async fn contact(auth: OptionalAuth) -> impl IntoResponse {
    ContactTemplate {
        signed_in_as: auth.signed_in_as(),
    }
}
