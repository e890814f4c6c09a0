//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Registration, password login, logout
//! - `cart` - Cart line validation and persistence

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
