//! Cart service.
//!
//! Validates cart lines before they reach the cart store.

use rust_decimal::Decimal;
use thiserror::Error;

use wardrobe_core::CartItemId;

use crate::db::{CartRepository, RepositoryError};
use crate::models::NewCartItem;

/// Longest product name accepted for a cart line.
const MAX_PRODUCT_NAME_LENGTH: usize = 200;

/// Digits after the decimal point the cart store keeps (`NUMERIC(12, 2)`).
const PRICE_SCALE: u32 = 2;

/// Largest price the cart store can hold: 9,999,999,999.99.
const MAX_TOTAL_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Errors that can occur while adding to the cart.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
pub struct CartService<'a> {
    items: &'a dyn CartRepository,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(items: &'a dyn CartRepository) -> Self {
        Self { items }
    }

    /// Record a cart line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Validation` if the name is blank or too long or the
    /// price is negative, `CartError::Repository` if the write fails.
    pub async fn add_item(
        &self,
        product_name: &str,
        total_price: Decimal,
    ) -> Result<CartItemId, CartError> {
        let item = validate(product_name, total_price)?;
        let id = self.items.insert(&item).await?;

        tracing::info!(cart_item_id = %id, product = %item.product_name, "Cart item added");
        Ok(id)
    }
}

fn validate(product_name: &str, total_price: Decimal) -> Result<NewCartItem, CartError> {
    let product_name = product_name.trim();

    if product_name.is_empty() {
        return Err(CartError::Validation("productName is required.".to_owned()));
    }
    if product_name.chars().count() > MAX_PRODUCT_NAME_LENGTH {
        return Err(CartError::Validation(format!(
            "productName must be at most {MAX_PRODUCT_NAME_LENGTH} characters."
        )));
    }
    if total_price.is_sign_negative() && !total_price.is_zero() {
        return Err(CartError::Validation(
            "totalPrice cannot be negative.".to_owned(),
        ));
    }
    if total_price.normalize().scale() > PRICE_SCALE {
        return Err(CartError::Validation(format!(
            "totalPrice must have at most {PRICE_SCALE} decimal places."
        )));
    }
    if total_price > MAX_TOTAL_PRICE {
        return Err(CartError::Validation(format!(
            "totalPrice must be at most {MAX_TOTAL_PRICE}."
        )));
    }

    Ok(NewCartItem {
        product_name: product_name.to_owned(),
        total_price,
    })
}
