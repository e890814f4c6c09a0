//! Catalog product type.

use wardrobe_core::{Price, ProductId};

/// A product offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Image file name inside the public `images/` directory.
    pub image: String,
    pub price: Price,
}
