//! Wardrobe storefront library.
//!
//! Registration and login with session cookies, a read-only product catalog
//! and a cart API. The binary in `main.rs` wires these to `PostgreSQL`; the
//! library form lets the router be driven directly in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::path::Path;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionStore;

use state::AppState;

/// Asset subdirectories whose files are also served from the site root.
const ROOT_ASSET_DIRS: [&str; 4] = ["css", "fonts", "images", "js"];

/// Build the storefront router over `state`, keeping sessions in `session_store`.
///
/// Requests that match no route are answered from the static asset directory.
pub fn app<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = middleware::create_session_layer(session_store, state.config());
    let assets = static_files(&state.config().static_dir);

    Router::new()
        .merge(routes::routes())
        .fallback_service(assets)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `dir`, then each of its [`ROOT_ASSET_DIRS`], at the site root.
fn static_files(dir: &Path) -> ServeDir<ServeDir<ServeDir<ServeDir<ServeDir>>>> {
    let [css, fonts, images, js] = ROOT_ASSET_DIRS.map(|sub| dir.join(sub));

    ServeDir::new(dir).fallback(
        ServeDir::new(css).fallback(ServeDir::new(fonts).fallback(
            ServeDir::new(images).fallback(ServeDir::new(js)),
        )),
    )
}
