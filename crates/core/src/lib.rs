//! Wardrobe Core - Shared types library.
//!
//! This crate provides the types shared by the Wardrobe components:
//! - `storefront` - The public shop (pages, auth, cart API)
//! - `cli` - Operator tooling for migrations and catalog checks
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. The optional `postgres` feature adds `sqlx` encoding for them.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
