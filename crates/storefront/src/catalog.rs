//! Product catalog.
//!
//! The catalog is loaded once at startup and shared read-only through
//! [`AppState`](crate::state::AppState). Without a catalog file the built-in
//! product list is used.
//!
//! # File format
//!
//! ```json
//! [
//!   { "id": 1, "name": "T-shirt", "image": "ts.png", "price": 50.00 }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use wardrobe_core::{CurrencyCode, Price, PriceError, ProductId};

use crate::models::Product;

/// Built-in products: id, name, image, price in cents.
const DEFAULT_PRODUCTS: &[(i32, &str, &str, u32)] = &[
    (1, "T-shirt", "ts.png", 5_000),
    (2, "Shirt", "sh.jpeg", 10_000),
    (3, "Hoodies", "ho.png", 12_000),
    (4, "Cargo pants", "car.png", 4_000),
    (5, "Jeans pants", "jeans.png", 2_800),
    (6, "Chinos pants", "chinos.png", 9_800),
    (7, "Belts", "bel.jpeg", 40_500),
    (8, "Summer Cap", "cap.png", 38_900),
    (9, "Sun glasses", "Image_Editor (8).png", 78_900),
];

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    #[error("product {id}: {source}")]
    InvalidPrice {
        id: ProductId,
        #[source]
        source: PriceError,
    },

    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    image: String,
    price: Decimal,
}

/// Immutable, ordered product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The built-in product list.
    #[must_use]
    pub fn builtin() -> Self {
        let products = DEFAULT_PRODUCTS
            .iter()
            .map(|&(id, name, image, cents)| Product {
                id: ProductId::new(id),
                name: name.to_owned(),
                image: image.to_owned(),
                price: Price::from_cents(cents),
            })
            .collect();

        Self { products }
    }

    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed, an id repeats, a name
    /// is blank or a price is negative.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        let mut seen = HashSet::with_capacity(records.len());
        let mut products = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(record.id));
            }
            let price = Price::new(record.price, CurrencyCode::USD).map_err(|source| {
                CatalogError::InvalidPrice {
                    id: record.id,
                    source,
                }
            })?;

            products.push(Product {
                id: record.id,
                name: record.name,
                image: record.image,
                price,
            });
        }

        Ok(Self { products })
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json`]; also fails if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise use the built-in list.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_path`].
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        path.map_or_else(|| Ok(Self::builtin()), Self::from_path)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
