//! `PostgreSQL` credential store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wardrobe_core::{Email, UserId};

use super::{RepositoryError, UserRepository};
use crate::models::{NewUser, Profile, User};

/// Row shape shared by every `users` query.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    password_hash: String,
    name: String,
    address: String,
    city: String,
    pincode: String,
    state: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<(User, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let user = User {
            id: self.id,
            email,
            profile: Profile {
                name: self.name,
                address: self.address,
                city: self.city,
                pincode: self.pincode,
                state: self.state,
                phone: self.phone,
            },
            created_at: self.created_at,
        };

        Ok((user, self.password_hash))
    }
}

/// Repository for the `users` table.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        let id: UserId = sqlx::query_scalar(
            r"
            INSERT INTO users (email, password_hash, name, address, city, pincode, state, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile.name)
        .bind(&user.profile.address)
        .bind(&user.profile.city)
        .bind(&user.profile.pincode)
        .bind(&user.profile.state)
        .bind(&user.profile.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, email, password_hash, name, address, city, pincode, state, phone, created_at
            FROM users
            WHERE email = $1
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
