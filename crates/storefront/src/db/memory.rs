//! Process-local repositories.
//!
//! Backed by a mutex-guarded `Vec`, with IDs assigned sequentially from 1.
//! [`MemoryUserRepository::set_unavailable`] and its cart counterpart make
//! every call fail, which lets tests exercise the persistence-error paths.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use wardrobe_core::{CartItemId, Email, UserId};

use super::{CartRepository, RepositoryError, UserRepository};
use crate::models::{CartItem, NewCartItem, NewUser, User};

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("memory store switched off".to_owned())
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("memory store lock poisoned".to_owned())
}

fn next_id(len: usize) -> Result<i32, RepositoryError> {
    i32::try_from(len + 1).map_err(|_| RepositoryError::Unavailable("id space exhausted".to_owned()))
}

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<(User, String)>>,
    unavailable: AtomicBool,
}

impl MemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.lock().map_or(0, |users| users.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        self.check()?;
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        let id = UserId::new(next_id(users.len())?);

        users.push((
            User {
                id,
                email: user.email.clone(),
                profile: user.profile.clone(),
                created_at: Utc::now(),
            },
            user.password_hash.clone(),
        ));

        Ok(id)
    }

    async fn find_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        self.check()?;
        let users = self.users.lock().map_err(|_| poisoned())?;
        Ok(users.iter().find(|(user, _)| &user.email == email).cloned())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check()
    }
}

/// In-memory cart store.
#[derive(Default)]
pub struct MemoryCartRepository {
    items: Mutex<Vec<CartItem>>,
    unavailable: AtomicBool,
}

impl MemoryCartRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of every stored line, oldest first.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.lock().map(|items| items.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
    async fn insert(&self, item: &NewCartItem) -> Result<CartItemId, RepositoryError> {
        self.check()?;
        let mut items = self.items.lock().map_err(|_| poisoned())?;
        let id = CartItemId::new(next_id(items.len())?);

        items.push(CartItem {
            id,
            product_name: item.product_name.clone(),
            total_price: item.total_price,
            created_at: Utc::now(),
        });

        Ok(id)
    }

    async fn get(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        self.check()?;
        let items = self.items.lock().map_err(|_| poisoned())?;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }
}
