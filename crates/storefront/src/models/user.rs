//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use wardrobe_core::{Email, UserId};

/// Contact and shipping details captured at registration.
///
/// Every field is optional on the form and stored as an empty string when
/// left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub state: String,
    pub phone: String,
}

/// A registered storefront user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (not unique across users).
    pub email: Email,
    pub profile: Profile,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// A user record ready to be persisted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub profile: Profile,
}
