//! Error types for StyleHub API calls.
//!
//! Every failure a view can observe collapses into [`ApiError`]: transport
//! failures, undecodable bodies, and non-success responses. Callers surface
//! one transient notification and leave prior state unchanged - there is no
//! retry policy, so each variant represents the outcome of exactly one
//! attempt.

use thiserror::Error;

/// Errors that can occur when calling the StyleHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, DNS, or protocol error).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or a generic fallback.
        message: String,
    },

    /// The API answered 200 but declined the operation (e.g., a login
    /// response without a token).
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// One-line text for user-facing failure notifications.
    ///
    /// Transport and decode errors intentionally collapse to a generic
    /// message; the detail is logged, not shown.
    #[must_use]
    pub fn notification(&self) -> String {
        match self {
            Self::Http(_) => "Network error, please try again".to_owned(),
            Self::Parse(_) => "Unexpected response from server".to_owned(),
            Self::Api { message, .. } | Self::Rejected(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 401,
            message: "Invalid credentials".to_owned(),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid credentials");
    }

    #[test]
    fn test_rejected_display_is_message() {
        let err = ApiError::Rejected("Login failed".to_owned());
        assert_eq!(err.to_string(), "Login failed");
        assert_eq!(err.notification(), "Login failed");
    }
}
