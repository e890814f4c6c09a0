//! Catalog inspection.
//!
//! Loads the catalog exactly as the storefront does at startup, so a broken
//! catalog file is caught before deploying it.

use std::path::PathBuf;

use wardrobe_storefront::catalog::{Catalog, CatalogError};

/// Load and print the catalog.
///
/// `path` overrides `STOREFRONT_CATALOG_PATH`. With neither set, the built-in
/// list is printed.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or fails validation.
pub fn print(path: Option<PathBuf>) -> Result<(), CatalogError> {
    dotenvy::dotenv().ok();

    let path = path.or_else(|| {
        std::env::var("STOREFRONT_CATALOG_PATH")
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    });

    let catalog = Catalog::load(path.as_deref())?;
    tracing::info!(products = catalog.len(), "Catalog loaded");

    #[allow(clippy::print_stdout)]
    {
        println!("{:>4}  {:<20}  {:>10}  image", "id", "name", "price");
        for product in catalog.list() {
            println!(
                "{:>4}  {:<20}  {:>10}  {}",
                product.id.to_string(),
                product.name,
                product.price.to_string(),
                product.image
            );
        }
    }

    Ok(())
}
