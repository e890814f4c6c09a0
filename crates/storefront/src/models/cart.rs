//! Cart line items.
//!
//! Items are recorded without any reference to a user or session, so the
//! persisted cart is a single global log.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use wardrobe_core::CartItemId;

/// A persisted cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_name: String,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A validated cart line awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_name: String,
    pub total_price: Decimal,
}
