//! Domain models for storefront.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CartItem, NewCartItem};
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, Profile, User};
