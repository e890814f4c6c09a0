//! Member landing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, response::IntoResponse};

use crate::filters;
use crate::models::CurrentUser;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub signed_in_as: Option<String>,
    pub email: String,
}

/// Display the landing page.
///
/// Mounted behind `require_auth`, which supplies the [`CurrentUser`].
pub async fn index(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    let email = user.email.to_string();
    IndexTemplate {
        signed_in_as: Some(email.clone()),
        email,
    }
}
