//! Product catalog types and queries.
//!
//! The engine does not ship product data; callers hand a product list to
//! [`Catalog`] and query it. Filtering and sorting reproduce the
//! storefront's browse behavior, including its quirks (size filters only
//! match in-stock sizes, "newest" applies no ordering).

use std::collections::BTreeSet;

use evershop_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Kids,
}

impl Category {
    /// Parses a query-string style value, for example `"men"`.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "men" => Some(Self::Men),
            "women" => Some(Self::Women),
            "kids" => Some(Self::Kids),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
        };
        f.write_str(label)
    }
}

/// One purchasable size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    /// Size label, for example `"M"` or `"42"`.
    pub size: String,
    /// Whether this size can currently be bought.
    pub in_stock: bool,
    /// Units on hand for this size.
    pub quantity: u32,
}

/// One color variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOption {
    /// Color name shown to the shopper.
    pub name: String,
    /// CSS hex value for the swatch.
    pub hex: String,
    /// Images specific to this color.
    pub images: Vec<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Current unit price.
    pub price: Decimal,
    /// Pre-sale price, present only for discounted products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub category: Category,
    pub brand: String,
    pub images: Vec<String>,
    pub sizes: Vec<SizeOption>,
    pub colors: Vec<ColorOption>,
    /// Whether the product as a whole can be bought.
    pub in_stock: bool,
    /// Average star rating, 0 to 5.
    pub rating: f64,
    pub review_count: u32,
    /// Included in the featured shelf.
    pub featured: bool,
}

/// Result ordering for catalog queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best rated first.
    Rating,
    /// Input order preserved; the storefront never ordered by recency.
    #[default]
    Newest,
}

impl SortBy {
    /// Parses a query-string style value, for example `"price-asc"`.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            "rating" => Some(Self::Rating),
            "newest" => Some(Self::Newest),
            _ => None,
        }
    }
}

/// Browse filters, all optional.
///
/// Empty brand and size lists mean "any". The size filter matches only
/// sizes that are in stock on the product.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub category: Option<Category>,
    /// Inclusive price bounds.
    pub price_range: Option<(Decimal, Decimal)>,
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
    pub in_stock_only: bool,
    pub sort: SortBy,
}

/// A queryable product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wraps a product list for querying.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in input order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks a product up by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products in the given category, input order preserved.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Products on the featured shelf.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|product| product.featured).collect()
    }

    /// Case-insensitive substring search over name, description and brand.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product.brand.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Sorted distinct brand names.
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .products
            .iter()
            .map(|product| product.brand.clone())
            .collect();
        set.into_iter().collect()
    }

    /// Sorted distinct size labels, optionally narrowed to one category.
    #[must_use]
    pub fn sizes(&self, category: Option<Category>) -> Vec<String> {
        let set: BTreeSet<String> = self
            .products
            .iter()
            .filter(|product| category.is_none_or(|c| product.category == c))
            .flat_map(|product| product.sizes.iter().map(|size| size.size.clone()))
            .collect();
        set.into_iter().collect()
    }

    /// Lowest and highest product price, `(0, 0)` for an empty catalog.
    #[must_use]
    pub fn price_range(&self) -> (Decimal, Decimal) {
        let min = self.products.iter().map(|product| product.price).min();
        let max = self.products.iter().map(|product| product.price).max();
        match (min, max) {
            (Some(min), Some(max)) => (min, max),
            _ => (Decimal::ZERO, Decimal::ZERO),
        }
    }

    /// Applies browse filters, then the requested ordering.
    #[must_use]
    pub fn filter(&self, filters: &SearchFilters) -> Vec<&Product> {
        let mut matched: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| Self::matches(product, filters))
            .collect();

        match filters.sort {
            SortBy::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            SortBy::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            SortBy::Rating => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortBy::Newest => {}
        }
        matched
    }

    fn matches(product: &Product, filters: &SearchFilters) -> bool {
        if let Some(category) = filters.category {
            if product.category != category {
                return false;
            }
        }
        if let Some((min, max)) = filters.price_range {
            if product.price < min || product.price > max {
                return false;
            }
        }
        if !filters.brands.is_empty() && !filters.brands.contains(&product.brand) {
            return false;
        }
        if !filters.sizes.is_empty() {
            let has_size = product
                .sizes
                .iter()
                .any(|size| size.in_stock && filters.sizes.contains(&size.size));
            if !has_size {
                return false;
            }
        }
        if filters.in_stock_only && !product.in_stock {
            return false;
        }
        true
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn product(id: &str, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: format!("{name} description"),
            price,
            original_price: None,
            category: Category::Men,
            brand: "Evershop".to_owned(),
            images: vec![],
            sizes: vec![SizeOption {
                size: "M".to_owned(),
                in_stock: true,
                quantity: 5,
            }],
            colors: vec![],
            in_stock: true,
            rating: 4.0,
            review_count: 10,
            featured: false,
        }
    }

    fn catalog() -> Catalog {
        let mut shirt = product("p1", "Linen Shirt", dec!(49.99));
        shirt.brand = "Aster".to_owned();
        shirt.rating = 4.8;
        shirt.featured = true;

        let mut jeans = product("p2", "Slim Jeans", dec!(89.00));
        jeans.category = Category::Women;
        jeans.rating = 4.2;

        let mut sneakers = product("p3", "Court Sneakers", dec!(120.00));
        sneakers.description = "Classic court shoe in white leather".to_owned();
        sneakers.in_stock = false;
        sneakers.sizes = vec![SizeOption {
            size: "42".to_owned(),
            in_stock: false,
            quantity: 0,
        }];
        sneakers.rating = 3.9;

        Catalog::new(vec![shirt, jeans, sneakers])
    }

    #[test]
    fn looks_up_by_id() {
        let catalog = catalog();
        assert_eq!(
            catalog.product(&ProductId::new("p2")).unwrap().name,
            "Slim Jeans"
        );
        assert!(catalog.product(&ProductId::new("nope")).is_none());
    }

    #[test]
    fn search_is_case_insensitive_over_all_text_fields() {
        let catalog = catalog();
        let by_name = catalog.search("LINEN");
        assert_eq!(by_name.len(), 1);

        let by_description = catalog.search("white leather");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description.first().unwrap().name, "Court Sneakers");

        let by_brand = catalog.search("aster");
        assert_eq!(by_brand.len(), 1);
    }

    #[test]
    fn filters_by_category_and_stock() {
        let catalog = catalog();
        let filters = SearchFilters {
            category: Some(Category::Men),
            in_stock_only: true,
            ..SearchFilters::default()
        };
        let matched = catalog.filter(&filters);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Linen Shirt");
    }

    #[test]
    fn size_filter_requires_the_size_in_stock() {
        let catalog = catalog();
        // Sneakers carry size 42 but it is out of stock.
        let filters = SearchFilters {
            sizes: vec!["42".to_owned()],
            ..SearchFilters::default()
        };
        assert!(catalog.filter(&filters).is_empty());

        let filters = SearchFilters {
            sizes: vec!["M".to_owned()],
            ..SearchFilters::default()
        };
        assert_eq!(catalog.filter(&filters).len(), 2);
    }

    #[test]
    fn filters_by_inclusive_price_range() {
        let catalog = catalog();
        let filters = SearchFilters {
            price_range: Some((dec!(49.99), dec!(89.00))),
            ..SearchFilters::default()
        };
        let matched = catalog.filter(&filters);
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn sorts_by_price_both_directions() {
        let catalog = catalog();
        let ascending = catalog.filter(&SearchFilters {
            sort: SortBy::PriceAsc,
            ..SearchFilters::default()
        });
        let prices: Vec<Decimal> = ascending.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![dec!(49.99), dec!(89.00), dec!(120.00)]);

        let descending = catalog.filter(&SearchFilters {
            sort: SortBy::PriceDesc,
            ..SearchFilters::default()
        });
        assert_eq!(descending.first().unwrap().price, dec!(120.00));
    }

    #[test]
    fn sorts_by_rating_descending() {
        let catalog = catalog();
        let rated = catalog.filter(&SearchFilters {
            sort: SortBy::Rating,
            ..SearchFilters::default()
        });
        let ratings: Vec<f64> = rated.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![4.8, 4.2, 3.9]);
    }

    #[test]
    fn newest_preserves_input_order() {
        let catalog = catalog();
        let unsorted = catalog.filter(&SearchFilters::default());
        let ids: Vec<&str> = unsorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn distinct_brands_and_sizes_are_sorted() {
        let catalog = catalog();
        assert_eq!(catalog.brands(), vec!["Aster", "Evershop"]);
        assert_eq!(catalog.sizes(None), vec!["42", "M"]);
        assert_eq!(catalog.sizes(Some(Category::Men)), vec!["42", "M"]);
        assert_eq!(catalog.sizes(Some(Category::Women)), vec!["M"]);
    }

    #[test]
    fn price_range_of_empty_catalog_is_zero() {
        assert_eq!(
            Catalog::new(vec![]).price_range(),
            (Decimal::ZERO, Decimal::ZERO)
        );
        assert_eq!(catalog().price_range(), (dec!(49.99), dec!(120.00)));
    }

    #[test]
    fn parses_query_params() {
        assert_eq!(SortBy::from_param("price-asc"), Some(SortBy::PriceAsc));
        assert_eq!(SortBy::from_param("bogus"), None);
        assert_eq!(Category::from_param("kids"), Some(Category::Kids));
        assert_eq!(Category::from_param("Mens"), None);
    }
}
