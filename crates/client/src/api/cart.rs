//! Cart operations.
//!
//! The remote API holds the authoritative cart; the client keeps a local
//! mirror only for the lifetime of a view, refetching on the next visit
//! instead of reconciling. Cart reads are deliberately never cached.
//!
//! Updates replace the whole line list. A caller that optimistically edited
//! its mirror must keep the pre-update value until the call succeeds - on
//! failure the mirror stays as it was.

use reqwest::Method;
use serde_json::json;

use stylehub_core::UserId;

use super::types::CartLine;
use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Fetch the current cart snapshot for a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cart(&self, user: &UserId) -> Result<Vec<CartLine>, ApiError> {
        self.execute(Method::GET, &format!("/getCartDetail/{user}"), None)
            .await
    }

    /// Replace the customer's cart with `lines`.
    ///
    /// Returns the acknowledged line list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails; the server-side cart is
    /// then unchanged and callers must keep their previous mirror.
    pub async fn replace_cart(
        &self,
        user: &UserId,
        lines: &[CartLine],
    ) -> Result<Vec<CartLine>, ApiError> {
        let body = json!({ "cartDetails": lines });
        self.execute(Method::PUT, &format!("/CustomerUpdate/{user}"), Some(body))
            .await
    }
}
