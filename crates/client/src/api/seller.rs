//! Seller dashboard operations: listing, creating, and deleting products.

use reqwest::Method;

use stylehub_core::{ProductId, UserId};

use super::cache::CacheKey;
use super::types::{NewProduct, Product};
use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Fetch all products listed by a seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn seller_products(&self, seller: &UserId) -> Result<Vec<Product>, ApiError> {
        self.execute(Method::GET, &format!("/getSellerProducts/{seller}"), None)
            .await
    }

    /// Create a product listing for a seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the API declines the listing or the request fails.
    pub async fn create_product(
        &self,
        seller: &UserId,
        input: &NewProduct,
    ) -> Result<Product, ApiError> {
        let mut body = serde_json::to_value(input)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("seller".to_owned(), serde_json::to_value(seller)?);
        }

        let created: Product = self.execute(Method::POST, "/ProductCreate", Some(body)).await?;

        self.inner.catalog_cache.invalidate(&CacheKey::Catalog).await;

        Ok(created)
    }

    /// Delete a product listing. Only the response status matters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.execute_unit(Method::DELETE, &format!("/DeleteProduct/{id}"), None)
            .await?;

        self.inner.catalog_cache.invalidate(&CacheKey::Catalog).await;
        self.inner
            .catalog_cache
            .invalidate(&CacheKey::Product(id.to_string()))
            .await;

        Ok(())
    }
}
