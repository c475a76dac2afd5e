//! Authentication operations: login and registration.
//!
//! The API exposes separate endpoints per role; the role chosen at the login
//! form decides which endpoint is called and becomes the session role on
//! success. Both operations answer 200 with a token on success and 200 with
//! only a `message` on rejection - the absence of a token is the failure
//! signal.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use stylehub_core::{AccountRole, Email};

use super::ApiClient;
use super::types::UserRecord;
use crate::error::ApiError;

/// Login credentials.
pub struct Credentials {
    /// Account email.
    pub email: Email,
    /// Account password, sent to the API and never stored.
    pub password: SecretString,
}

/// Registration input.
///
/// Seller registration structurally requires a shop name; customer
/// registration has no such field.
pub enum Registration {
    /// Register a shopper account.
    Customer {
        /// Display name.
        name: String,
        /// Account email.
        email: Email,
        /// Account password.
        password: SecretString,
    },
    /// Register a merchant account.
    Seller {
        /// Display name.
        name: String,
        /// Account email.
        email: Email,
        /// Account password.
        password: SecretString,
        /// Public shop name shown on listings.
        shop_name: String,
    },
}

impl Registration {
    /// The account role this registration creates.
    #[must_use]
    pub const fn role(&self) -> AccountRole {
        match self {
            Self::Customer { .. } => AccountRole::Customer,
            Self::Seller { .. } => AccountRole::Seller,
        }
    }
}

/// The identity triple a successful authentication yields.
///
/// Hand it to [`crate::session::SessionStore::login`] to establish the
/// session.
#[derive(Debug)]
pub struct AuthSession {
    /// The profile record the API returned.
    pub user: UserRecord,
    /// Opaque bearer token.
    pub token: String,
    /// The role that was authenticated.
    pub role: AccountRole,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: Option<String>,
    message: Option<String>,
    #[serde(flatten)]
    user: serde_json::Map<String, serde_json::Value>,
}

impl ApiClient {
    /// Log in as `role` with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the API declines the credentials,
    /// or another variant for transport/decode failures.
    pub async fn login(
        &self,
        role: AccountRole,
        credentials: &Credentials,
    ) -> Result<AuthSession, ApiError> {
        let path = match role {
            AccountRole::Customer => "/CustomerLogin",
            AccountRole::Seller => "/SellerLogin",
        };
        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });

        let response: AuthResponse = self.execute(Method::POST, path, Some(body)).await?;
        into_auth_session(response, role, "Login failed")
    }

    /// Register a new account and authenticate it in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the API declines the registration
    /// (e.g., the email is taken), or another variant for transport/decode
    /// failures.
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError> {
        let (path, body) = match registration {
            Registration::Customer {
                name,
                email,
                password,
            } => (
                "/CustomerRegister",
                json!({
                    "name": name,
                    "email": email,
                    "password": password.expose_secret(),
                }),
            ),
            Registration::Seller {
                name,
                email,
                password,
                shop_name,
            } => (
                "/SellerRegister",
                json!({
                    "name": name,
                    "email": email,
                    "password": password.expose_secret(),
                    "shopName": shop_name,
                }),
            ),
        };

        let response: AuthResponse = self.execute(Method::POST, path, Some(body)).await?;
        into_auth_session(response, registration.role(), "Registration failed")
    }
}

fn into_auth_session(
    response: AuthResponse,
    role: AccountRole,
    fallback: &str,
) -> Result<AuthSession, ApiError> {
    match response.token {
        Some(token) if !token.is_empty() => {
            let user: UserRecord =
                serde_json::from_value(serde_json::Value::Object(response.user))?;
            Ok(AuthSession { user, token, role })
        }
        _ => Err(ApiError::Rejected(
            response.message.unwrap_or_else(|| fallback.to_owned()),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(raw: serde_json::Value) -> AuthResponse {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_token_response_becomes_session() {
        let auth = into_auth_session(
            response(serde_json::json!({
                "token": "jwt-abc",
                "_id": "u1",
                "name": "Priya",
                "email": "priya@example.com",
            })),
            AccountRole::Customer,
            "Login failed",
        )
        .unwrap();

        assert_eq!(auth.token, "jwt-abc");
        assert_eq!(auth.role, AccountRole::Customer);
        assert_eq!(auth.user.name, "Priya");
    }

    #[test]
    fn test_tokenless_response_is_rejected_with_message() {
        let err = into_auth_session(
            response(serde_json::json!({"message": "User not found"})),
            AccountRole::Customer,
            "Login failed",
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::Rejected(m) if m == "User not found"));
    }

    #[test]
    fn test_tokenless_response_without_message_uses_fallback() {
        let err = into_auth_session(
            response(serde_json::json!({})),
            AccountRole::Seller,
            "Registration failed",
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::Rejected(m) if m == "Registration failed"));
    }
}
