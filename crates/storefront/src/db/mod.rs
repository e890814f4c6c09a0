//! Persistence for the storefront.
//!
//! # Database: `wardrobe`
//!
//! ## Tables
//!
//! - `users` - Registered customers (credential store)
//! - `cart_items` - Cart lines, unattributed
//! - `tower_sessions.session` - Tower-sessions storage (created by the CLI)
//!
//! Handlers only see the [`UserRepository`] and [`CartRepository`] traits.
//! `PostgreSQL` implementations live in [`users`] and [`cart_items`];
//! [`memory`] holds process-local implementations used by the test suite.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p wardrobe-cli -- migrate
//! ```

pub mod cart_items;
pub mod memory;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use wardrobe_core::{CartItemId, Email, UserId};

use crate::models::{CartItem, NewCartItem, NewUser, User};

pub use cart_items::PgCartRepository;
pub use memory::{MemoryCartRepository, MemoryUserRepository};
pub use users::PgUserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The backend is not accepting requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return its generated ID.
    ///
    /// Email uniqueness is not checked.
    async fn create(&self, user: &NewUser) -> Result<UserId, RepositoryError>;

    /// Find the earliest-registered user with `email`, together with the
    /// stored password hash.
    async fn find_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// Check that the backend answers.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Cart store.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Persist a cart line and return its generated ID.
    async fn insert(&self, item: &NewCartItem) -> Result<CartItemId, RepositoryError>;

    /// Get a cart line by ID.
    async fn get(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
