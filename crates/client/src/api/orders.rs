//! Order placement.

use reqwest::Method;
use serde_json::json;

use stylehub_core::UserId;

use super::types::{Order, ShippingData};
use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Place an order for the buyer's current cart.
    ///
    /// The API captures the cart server-side; the request carries only the
    /// buyer and the shipping details. Success is an order record with an
    /// id - a response without one decodes as a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the API declines the order or the request fails.
    pub async fn place_order(
        &self,
        buyer: &UserId,
        shipping: &ShippingData,
    ) -> Result<Order, ApiError> {
        let body = json!({
            "buyer": buyer,
            "shippingData": shipping,
        });
        self.execute(Method::POST, "/newOrder", Some(body)).await
    }
}
