//! Cart API handlers.
//!
//! Cart lines are recorded without any link to the user or session that
//! added them. Every response uses the `{ success, message }` envelope.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::services::CartError;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_name: String,
    pub total_price: Decimal,
}

/// Response for cart API calls.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub message: String,
}

impl CartResponse {
    fn reply(status: StatusCode, success: bool, message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                success,
                message: message.into(),
            }),
        )
    }
}

/// Record a cart line.
///
/// POST /api/cart/add
#[instrument(skip(state, body))]
pub async fn add(
    State(state): State<AppState>,
    body: Result<Json<AddToCartRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Malformed cart request");
            return CartResponse::reply(
                StatusCode::BAD_REQUEST,
                false,
                "productName and totalPrice are required.",
            );
        }
    };

    match state
        .cart()
        .add_item(&request.product_name, request.total_price)
        .await
    {
        Ok(_) => CartResponse::reply(StatusCode::OK, true, "Item added to cart successfully."),
        Err(CartError::Validation(msg)) => {
            tracing::warn!(reason = %msg, "Cart item rejected");
            CartResponse::reply(StatusCode::BAD_REQUEST, false, msg)
        }
        Err(CartError::Repository(e)) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to add item to cart");
            CartResponse::reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                false,
                "An error occurred while adding item to cart.",
            )
        }
    }
}
