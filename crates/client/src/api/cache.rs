//! Cache types for catalog API responses.

use super::types::Product;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// The full catalog listing.
    Catalog,
    /// A single product detail, keyed by product id.
    Product(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// The full catalog listing.
    Catalog(Vec<Product>),
    /// A single product detail.
    Product(Box<Product>),
}
