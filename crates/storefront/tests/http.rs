//! End-to-end HTTP flows against the full router.
//!
//! Sessions live in `MemoryStore`; users and cart items in the in-memory
//! repositories, so no database is needed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};

use wardrobe_storefront::catalog::Catalog;
use wardrobe_storefront::config::{PasswordHashingConfig, StorefrontConfig};
use wardrobe_storefront::db::{MemoryCartRepository, MemoryUserRepository};
use wardrobe_storefront::state::AppState;

struct TestApp {
    router: Router,
    users: Arc<MemoryUserRepository>,
    cart_items: Arc<MemoryCartRepository>,
}

/// Session store over `MemoryStore` whose deletes can be made to fail.
#[derive(Debug, Clone, Default)]
struct FlakySessionStore {
    inner: MemoryStore,
    fail_deletes: Arc<AtomicBool>,
}

impl FlakySessionStore {
    fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl SessionStore for FlakySessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        self.inner.create(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.inner.save(record).await
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        self.inner.load(session_id).await
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(session_store::Error::Backend(
                "session store offline".to_string(),
            ));
        }
        self.inner.delete(session_id).await
    }
}

impl TestApp {
    fn new() -> Self {
        Self::with_session_store(MemoryStore::default())
    }

    fn with_session_store<S>(session_store: S) -> Self
    where
        S: SessionStore + Clone,
    {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://unused"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8001,
            base_url: "http://localhost:8001".to_string(),
            static_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets"),
            catalog_path: None,
            password_hashing: PasswordHashingConfig {
                memory_kib: 256,
                iterations: 1,
                parallelism: 1,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let users = Arc::new(MemoryUserRepository::new());
        let cart_items = Arc::new(MemoryCartRepository::new());
        let state = AppState::new(
            config,
            Catalog::builtin(),
            users.clone(),
            cart_items.clone(),
        );

        Self {
            router: wardrobe_storefront::app(state, session_store),
            users,
            cart_items,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_owned())).unwrap())
            .await
    }

    async fn post_json(&self, uri: &str, json: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_owned()))
            .unwrap();
        self.send(request).await
    }

    /// Register a user and return the session cookie the response set.
    async fn register(&self, email: &str, password: &str) -> String {
        let form = format!(
            "email={}&password={password}&name=Asha&city=Pune&ph_no=555",
            email.replace('@', "%40")
        );
        let response = self.post_form("/register", &form, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("register sets a session cookie")
    }
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("wardrobe_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

// =============================================================================
// Login gate
// =============================================================================

#[tokio::test]
async fn test_index_redirects_anonymous_to_login() {
    let app = TestApp::new();

    let response = app.get("/index", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_public_pages_render_without_session() {
    let app = TestApp::new();

    for uri in ["/", "/login", "/register", "/logout", "/about", "/contact", "/products"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

// =============================================================================
// Registration and login
// =============================================================================

#[tokio::test]
async fn test_register_signs_in_and_opens_index() {
    let app = TestApp::new();

    let form = "email=asha%40example.com&password=secret&name=Asha&address=1+Main+St&city=Pune&pincode=411001&state=MH&ph_no=555";
    let response = app.post_form("/register", form, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/index");
    let cookie = session_cookie(&response).unwrap();
    assert_eq!(app.users.len(), 1);

    let response = app.get("/index", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("asha@example.com"));
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = TestApp::new();

    let response = app
        .post_form("/register", "email=not-an-email&password=secret", None)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn test_register_store_failure_is_500() {
    let app = TestApp::new();
    app.users.set_unavailable(true);

    let response = app
        .post_form("/register", "email=asha%40example.com&password=secret", None)
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Error registering user");
}

#[tokio::test]
async fn test_login_with_registered_credentials() {
    let app = TestApp::new();
    app.register("asha@example.com", "secret").await;

    let response = app
        .post_form("/login", "email=asha%40example.com&password=secret", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/index");
    let cookie = session_cookie(&response).unwrap();

    let response = app.get("/index", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new();
    app.register("asha@example.com", "secret").await;

    let wrong_password = app
        .post_form("/login", "email=asha%40example.com&password=guess", None)
        .await;
    let unknown_email = app
        .post_form("/login", "email=nobody%40example.com&password=secret", None)
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&wrong_password).is_none());

    let wrong_password = body_text(wrong_password).await;
    let unknown_email = body_text(unknown_email).await;
    assert_eq!(wrong_password, "Invalid email or password");
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_login_with_incomplete_form_is_401() {
    let app = TestApp::new();
    app.register("asha@example.com", "secret").await;

    for form in ["email=asha%40example.com", "password=secret", ""] {
        let response = app.post_form("/login", form, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{form}");
        assert!(session_cookie(&response).is_none(), "{form}");
        assert_eq!(body_text(response).await, "Invalid email or password", "{form}");
    }
}

#[tokio::test]
async fn test_register_with_incomplete_form_is_400() {
    let app = TestApp::new();

    for form in ["email=b%40example.com", "password=secret", ""] {
        let response = app.post_form("/register", form, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{form}");
    }
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn test_logout_ends_session_and_repeats_cleanly() {
    let app = TestApp::new();
    let cookie = app.register("asha@example.com", "secret").await;

    let first = app.post_form("/logout", "", Some(&cookie)).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_text(first).await, "Logout successful!");

    let second = app.post_form("/logout", "", Some(&cookie)).await;
    assert_eq!(second.status(), StatusCode::OK);

    let response = app.get("/index", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_logout_store_failure_is_500() {
    let store = FlakySessionStore::default();
    let app = TestApp::with_session_store(store.clone());
    let cookie = app.register("asha@example.com", "secret").await;

    store.fail_deletes();
    let response = app.post_form("/logout", "", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Error logging out");
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::new();

    let response = app.post_form("/logout", "", None).await;

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_single_product_renders() {
    let app = TestApp::new();

    let response = app.get("/single-product?productId=1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("T-shirt"));
    assert!(body.contains("50.00"));
}

#[tokio::test]
async fn test_single_product_not_found() {
    let app = TestApp::new();

    for uri in [
        "/single-product?productId=999",
        "/single-product?productId=abc",
        "/single-product",
    ] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_text(response).await, "Product not found");
    }
}

#[tokio::test]
async fn test_products_lists_catalog() {
    let app = TestApp::new();

    let body = body_text(app.get("/products", None).await).await;

    assert!(body.contains("Hoodies"));
    assert!(body.contains("/single-product?productId=9"));
}

// =============================================================================
// Cart API
// =============================================================================

#[tokio::test]
async fn test_cart_add_persists_item() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/cart/add", r#"{"productName":"T-shirt","totalPrice":50}"#)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Item added to cart successfully.");

    let items = app.cart_items.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_name, "T-shirt");
    assert_eq!(items[0].total_price, Decimal::from(50));
}

#[tokio::test]
async fn test_cart_add_rejects_invalid_values() {
    let app = TestApp::new();

    for body in [
        r#"{"productName":"T-shirt","totalPrice":-1}"#,
        r#"{"productName":"T-shirt","totalPrice":1.005}"#,
        r#"{"productName":"T-shirt","totalPrice":10000000000}"#,
        r#"{"productName":"   ","totalPrice":10}"#,
        r#"{"productName":"T-shirt"}"#,
        "not json",
    ] {
        let response = app.post_json("/api/cart/add", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["success"], false, "{body}");
    }

    assert!(app.cart_items.items().is_empty());
}

#[tokio::test]
async fn test_cart_add_store_failure() {
    let app = TestApp::new();
    app.cart_items.set_unavailable(true);

    let response = app
        .post_json("/api/cart/add", r#"{"productName":"Belts","totalPrice":405}"#)
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "An error occurred while adding item to cart.");
}

// =============================================================================
// Health and static assets
// =============================================================================

#[tokio::test]
async fn test_health_checks() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");

    assert_eq!(app.get("/health/ready", None).await.status(), StatusCode::OK);

    app.users.set_unavailable(true);
    assert_eq!(
        app.get("/health/ready", None).await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_static_assets_served_from_root_and_subdirectory() {
    let app = TestApp::new();

    assert_eq!(app.get("/css/style.css", None).await.status(), StatusCode::OK);
    assert_eq!(app.get("/style.css", None).await.status(), StatusCode::OK);
    assert_eq!(app.get("/cart.js", None).await.status(), StatusCode::OK);
    assert_eq!(
        app.get("/missing.css", None).await.status(),
        StatusCode::NOT_FOUND
    );
}
