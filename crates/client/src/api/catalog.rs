//! Catalog operations: product listing, product detail, and reviews.
//!
//! Listing and detail reads are cached with a short TTL. Review submission
//! writes through: the API answers with the updated product, which replaces
//! the cached detail entry.

use reqwest::Method;

use stylehub_core::ProductId;

use super::cache::{CacheKey, CacheValue};
use super::types::{Product, Review, ReviewInput};
use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Fetch the product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Catalog(products)) =
            self.inner.catalog_cache.get(&CacheKey::Catalog).await
        {
            tracing::debug!("Cache hit for catalog");
            return Ok(products);
        }

        let products: Vec<Product> = self.execute(Method::GET, "/getProducts", None).await?;

        self.inner
            .catalog_cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(products.clone()))
            .await;

        Ok(products)
    }

    /// Fetch a single product with its reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the API request
    /// fails.
    pub async fn product_detail(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = CacheKey::Product(id.to_string());

        if let Some(CacheValue::Product(product)) =
            self.inner.catalog_cache.get(&cache_key).await
        {
            tracing::debug!(product = %id, "Cache hit for product detail");
            return Ok(*product);
        }

        let product: Product = self
            .execute(Method::GET, &format!("/getProductDetail/{id}"), None)
            .await?;

        self.inner
            .catalog_cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Submit a review for a product.
    ///
    /// Returns the updated product record and refreshes the cached detail
    /// entry with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API declines the review or the request fails.
    pub async fn submit_review(
        &self,
        product: &ProductId,
        review: &ReviewInput,
    ) -> Result<Product, ApiError> {
        let updated: Product = self
            .execute(
                Method::PUT,
                &format!("/addReview/{product}"),
                Some(serde_json::to_value(review)?),
            )
            .await?;

        self.inner
            .catalog_cache
            .insert(
                CacheKey::Product(product.to_string()),
                CacheValue::Product(Box::new(updated.clone())),
            )
            .await;

        Ok(updated)
    }
}

/// Average rating across a product's reviews, when any exist.
///
/// Fallback for list responses where the API does not populate
/// `averageRating`.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    #[allow(clippy::cast_precision_loss)] // Review counts will never exceed f64 precision
    let count = reviews.len() as f64;
    Some(f64::from(sum) / count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::types::UserRef;
    use stylehub_core::UserId;

    fn review(rating: u8) -> Review {
        Review {
            id: None,
            rating,
            comment: String::new(),
            reviewer: UserRef::Id(UserId::new("u1")),
            date: None,
        }
    }

    #[test]
    fn test_average_rating_empty() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn test_average_rating() {
        let reviews = vec![review(5), review(4), review(3)];
        assert_eq!(average_rating(&reviews), Some(4.0));
    }
}
