//! `PostgreSQL` cart store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use wardrobe_core::CartItemId;

use super::{CartRepository, RepositoryError};
use crate::models::{CartItem, NewCartItem};

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    product_name: String,
    total_price: Decimal,
    created_at: DateTime<Utc>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.id,
            product_name: row.product_name,
            total_price: row.total_price,
            created_at: row.created_at,
        }
    }
}

/// Repository for the `cart_items` table.
#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn insert(&self, item: &NewCartItem) -> Result<CartItemId, RepositoryError> {
        let id: CartItemId = sqlx::query_scalar(
            r"
            INSERT INTO cart_items (product_name, total_price)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(&item.product_name)
        .bind(item.total_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        let row: Option<CartItemRow> = sqlx::query_as(
            r"
            SELECT id, product_name, total_price, created_at
            FROM cart_items
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }
}
