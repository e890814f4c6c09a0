//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Login page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (credential store ping)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! GET  /logout                 - Logout confirmation page
//! POST /logout                 - Logout action
//!
//! # Catalog & pages
//! GET  /about                  - About page
//! GET  /contact                - Contact page
//! GET  /products               - Product listing
//! GET  /single-product         - Product detail (?productId=)
//!
//! # Cart API
//! POST /api/cart/add           - Record a cart line (JSON)
//!
//! # Members (requires auth)
//! GET  /index                  - Landing page
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::require_auth;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::login_page))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout_page).post(auth::logout))
}

/// Create the public page and catalog routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/products", get(products::index))
        .route("/single-product", get(products::show))
}

/// Create the cart API routes router.
pub fn cart_api_routes() -> Router<AppState> {
    Router::new().route("/add", post(cart::add))
}

/// Routes only authenticated sessions may reach.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/index", get(home::index))
        .route_layer(middleware::from_fn(require_auth))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(page_routes())
        .nest("/api/cart", cart_api_routes())
        .merge(protected_routes())
}
