//! Catalog queries over a JSON product file.
//!
//! # Usage
//!
//! ```bash
//! # Filtered, sorted listing
//! es-cli products --file catalog.json list --category men --sort price-asc
//!
//! # Full-text search
//! es-cli products --file catalog.json search "linen shirt"
//! ```
//!
//! The file holds a JSON array of products in the same shape the
//! storefront persists them.

use std::path::Path;

use tracing::info;

use evershop_storefront::catalog::{Catalog, Category, Product, SearchFilters, SortBy};
use evershop_storefront::format::format_price;

/// List products, optionally filtered and sorted.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if a
/// filter value is not recognized.
pub async fn list(
    file_path: &str,
    category: Option<&str>,
    sort: Option<&str>,
    brands: Vec<String>,
    in_stock_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(file_path).await?;

    let category = match category {
        Some(value) => Some(
            Category::from_param(value).ok_or_else(|| format!("Invalid category: {value}"))?,
        ),
        None => None,
    };
    let sort = match sort {
        Some(value) => {
            SortBy::from_param(value).ok_or_else(|| format!("Invalid sort order: {value}"))?
        }
        None => SortBy::default(),
    };

    let filters = SearchFilters {
        category,
        brands,
        in_stock_only,
        sort,
        ..SearchFilters::default()
    };

    print_products(&catalog.filter(&filters));
    Ok(())
}

/// Search product names, descriptions, and brands.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn search(file_path: &str, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(file_path).await?;
    print_products(&catalog.search(query));
    Ok(())
}

async fn load_catalog(file_path: &str) -> Result<Catalog, Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let products: Vec<Product> = serde_json::from_str(&content)?;

    info!(path = %file_path, products = products.len(), "Loaded catalog");
    Ok(Catalog::new(products))
}

fn print_products(products: &[&Product]) {
    if products.is_empty() {
        info!("No matching products");
        return;
    }

    info!("{} products:", products.len());
    for product in products {
        let stock = if product.in_stock { "" } else { "  (out of stock)" };
        info!(
            "  {} - {} [{}]{stock}",
            product.name,
            format_price(product.price),
            product.brand
        );
    }
}
