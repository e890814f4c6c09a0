//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use wardrobe_core::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::Product;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// Bare amount, e.g. `50.00`. Also what the cart button submits.
    pub price: String,
    /// Amount with currency symbol, e.g. `$50.00`.
    pub display_price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            image_url: format!("/images/{}", product.image),
            price: product.price.amount_string(),
            display_price: product.price.to_string(),
        }
    }
}

/// Query parameters for the product detail page.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub signed_in_as: Option<String>,
    pub products: Vec<ProductView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub signed_in_as: Option<String>,
    pub product: ProductView,
}

/// Display product listing page.
pub async fn index(State(state): State<AppState>, auth: OptionalAuth) -> impl IntoResponse {
    ProductsIndexTemplate {
        signed_in_as: auth.signed_in_as(),
        products: state.catalog().list().iter().map(ProductView::from).collect(),
    }
}

/// Display product detail page.
///
/// A missing, non-numeric or unknown `productId` is a 404.
pub async fn show(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Query(query): Query<ProductQuery>,
) -> Result<ProductShowTemplate> {
    let product = query
        .product_id
        .as_deref()
        .and_then(|raw| raw.parse::<ProductId>().ok())
        .and_then(|id| state.catalog().get(id))
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(ProductShowTemplate {
        signed_in_as: auth.signed_in_as(),
        product: ProductView::from(product),
    })
}
