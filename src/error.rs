//! Error types for the Coincheck client library.
//!
//! Every failed call lands in exactly one of three buckets:
//!
//! - [`CoincheckError::Request`] - the HTTP exchange itself failed (bad URL,
//!   network/TLS failure, unreadable body).
//! - [`CoincheckError::Decode`] - bytes arrived but are not the expected JSON.
//! - [`CoincheckError::Api`] - the exchange answered and reported a failure in
//!   its own `success`/`error` envelope, usually with HTTP 200.

use thiserror::Error;

/// The main error type for all Coincheck client operations.
#[derive(Error, Debug)]
pub enum CoincheckError {
    /// Transport-level failure.
    #[error("Could not execute request: {0}")]
    Request(#[from] RequestError),

    /// Response body is not valid JSON or does not match the expected shape.
    #[error("Failed to decode response: {source}")]
    Decode {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The raw response body
        body: String,
    },

    /// Coincheck API reported a failure in the response body
    #[error("Coincheck API error: {0}")]
    Api(ApiError),

    /// Request signing failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl CoincheckError {
    /// Returns the exchange error if this is an API failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CoincheckError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the error happened before a response body was obtained.
    pub fn is_request(&self) -> bool {
        matches!(self, CoincheckError::Request(_))
    }

    /// Whether the response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, CoincheckError::Decode { .. })
    }
}

/// Transport-level failures raised by the dispatcher.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The request URL could not be built
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request payload could not be encoded
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Network, TLS or middleware failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[from] reqwest::Error),
}

/// Failure reported by Coincheck in the response envelope.
///
/// The message is kept verbatim as sent by the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error message from the `error` field
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    /// Create a new API error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Check if the exchange rejected the nonce.
    pub fn is_invalid_nonce(&self) -> bool {
        self.message.to_lowercase().contains("nonce")
    }

    /// Check if the exchange rejected the key or signature.
    pub fn is_invalid_authentication(&self) -> bool {
        let message = self.message.to_lowercase();
        message.contains("invalid authentication") || message.contains("signature")
    }

    /// Check if the account could not cover the request.
    pub fn is_insufficient_balance(&self) -> bool {
        let message = self.message.to_lowercase();
        message.contains("no balance") || message.contains("insufficient")
    }
}

/// Known Coincheck error messages for pattern matching.
pub mod error_messages {
    pub const INVALID_AUTHENTICATION: &str = "invalid authentication";
    pub const NONCE_NOT_INCREMENTED: &str = "Nonce must be incremented";
    pub const NO_BALANCE: &str = "no balance";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_is_verbatim() {
        let error = ApiError::new("no balance");
        assert_eq!(error.to_string(), "no balance");
        assert_eq!(
            CoincheckError::Api(error).to_string(),
            "Coincheck API error: no balance"
        );
    }

    #[test]
    fn test_api_error_predicates() {
        assert!(ApiError::new(error_messages::NONCE_NOT_INCREMENTED).is_invalid_nonce());
        assert!(ApiError::new(error_messages::INVALID_AUTHENTICATION).is_invalid_authentication());
        assert!(ApiError::new(error_messages::NO_BALANCE).is_insufficient_balance());
        assert!(!ApiError::new("amount is too small").is_invalid_nonce());
    }

    #[test]
    fn test_error_kind_helpers() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err = CoincheckError::from(RequestError::from(url_err));
        assert!(err.is_request());
        assert!(!err.is_decode());
        assert!(err.api_error().is_none());

        let json_err = serde_json::from_str::<u32>("x").unwrap_err();
        let err = CoincheckError::Decode {
            source: json_err,
            body: "x".to_string(),
        };
        assert!(err.is_decode());
    }
}
