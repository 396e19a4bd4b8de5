//! Coincheck REST API client implementation.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::auth::{
    CredentialsProvider, IncreasingNonce, NonceProvider, SignatureEncoding, signed_headers,
};
use crate::error::{ApiError, CoincheckError, RequestError};
use crate::rest::dispatcher::Dispatcher;
use crate::rest::endpoints::COINCHECK_BASE_URL;
use crate::rest::private::{Accounts, Balance, LeverageBalance, NewOrderRequest, Order};
use crate::rest::public::{OrderBook, Ticker, Trade};
use crate::rest::traits::CoincheckApi;

/// The Coincheck REST API client.
///
/// Every call computes a fresh nonce and signature, performs one HTTP round
/// trip and decodes the body into a typed record. Responses carrying
/// Coincheck's `success`/`error` envelope are checked before the record is
/// returned, so `Ok` always means the exchange accepted the call.
///
/// # Example
///
/// ```rust,no_run
/// use coincheck_api_client::rest::CoincheckClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoincheckClient::new();
///     let ticker = client.get_ticker().await?;
///     println!("Last: {}", ticker.last);
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use coincheck_api_client::rest::CoincheckClient;
/// use coincheck_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = CoincheckClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let balance = client.get_balance().await?;
///     println!("JPY: {}", balance.jpy);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoincheckClient {
    dispatcher: Dispatcher,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
    signature_encoding: SignatureEncoding,
}

/// How a response body reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Envelope {
    /// Plain market data, no failure indicator.
    None,
    /// `success` must be `true`.
    SuccessFlag,
    /// Failure is signalled by a non-empty `error`.
    ErrorOnly,
}

impl CoincheckClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`CoincheckClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> CoincheckClientBuilder {
        CoincheckClientBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Compute the headers for one request.
    ///
    /// With credentials configured every request is signed. Without them,
    /// public requests go out unsigned and private ones fail.
    fn headers(
        &self,
        uri: &str,
        body: &str,
        private: bool,
    ) -> Result<HeaderMap, CoincheckError> {
        match &self.credentials {
            Some(provider) => {
                let nonce = self.nonce_provider.next_nonce();
                signed_headers(
                    provider.get_credentials(),
                    nonce,
                    uri,
                    body,
                    self.signature_encoding,
                )?
                .to_header_map()
            }
            None if private => Err(CoincheckError::MissingCredentials),
            None => {
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Ok(headers)
            }
        }
    }

    /// Sign and dispatch a request, returning the raw body.
    pub(crate) async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: String,
        private: bool,
    ) -> Result<Vec<u8>, CoincheckError> {
        let uri = format!("{}{}", self.base_url, endpoint);
        let headers = self.headers(&uri, &body, private)?;
        Ok(self.dispatcher.request(method, &uri, body, headers).await?)
    }

    /// Make a GET request to a market data endpoint.
    pub(crate) async fn public_get<T>(&self, endpoint: &str) -> Result<T, CoincheckError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(Method::GET, endpoint, String::new(), false).await?;
        parse_response(endpoint, &body, Envelope::None)
    }

    /// Make an authenticated GET request.
    pub(crate) async fn private_get<T>(
        &self,
        endpoint: &str,
        envelope: Envelope,
    ) -> Result<T, CoincheckError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(Method::GET, endpoint, String::new(), true).await?;
        parse_response(endpoint, &body, envelope)
    }

    /// Make an authenticated POST request with a JSON body.
    ///
    /// Returns the raw response bytes, the caller decides how to decode them.
    pub(crate) async fn private_post<P>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<Vec<u8>, CoincheckError>
    where
        P: serde::Serialize,
    {
        let body = serde_json::to_string(payload).map_err(RequestError::Encode)?;
        self.execute(Method::POST, endpoint, body, true).await
    }
}

/// The `success`/`error` fields shared by Coincheck's account responses.
#[derive(Debug, Deserialize)]
struct ResponseStatus {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode a JSON value, keeping the raw body for the error.
pub(crate) fn decode<T>(body: &[u8]) -> Result<T, CoincheckError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| {
        let body = String::from_utf8_lossy(body).into_owned();
        tracing::debug!(error = %source, %body, "failed to decode response");
        CoincheckError::Decode { source, body }
    })
}

/// Check the response envelope.
///
/// Runs before the full record is decoded, since failure bodies such as
/// `{"success":false,"error":"..."}` lack the record's fields.
pub(crate) fn check_envelope(
    endpoint: &str,
    body: &[u8],
    envelope: Envelope,
) -> Result<(), CoincheckError> {
    if envelope == Envelope::None {
        return Ok(());
    }

    let status: ResponseStatus = decode(body)?;
    let error = status.error.filter(|e| !e.is_empty());

    let failed = match envelope {
        Envelope::SuccessFlag => status.success != Some(true),
        Envelope::ErrorOnly => error.is_some() || status.success == Some(false),
        Envelope::None => false,
    };

    if failed {
        let message = error.unwrap_or_else(|| "request was not successful".to_string());
        tracing::warn!(endpoint, error = %message, "Coincheck reported failure");
        return Err(CoincheckError::Api(ApiError::new(message)));
    }
    Ok(())
}

fn parse_response<T>(endpoint: &str, body: &[u8], envelope: Envelope) -> Result<T, CoincheckError>
where
    T: DeserializeOwned,
{
    check_envelope(endpoint, body, envelope)?;
    decode(body)
}

impl Default for CoincheckClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CoincheckClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoincheckClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("signature_encoding", &self.signature_encoding)
            .finish()
    }
}

/// Builder for [`CoincheckClient`].
pub struct CoincheckClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    signature_encoding: SignatureEncoding,
    user_agent: Option<String>,
    http_client: Option<ClientWithMiddleware>,
}

impl CoincheckClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: COINCHECK_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            signature_encoding: SignatureEncoding::default(),
            user_agent: None,
            http_client: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set how the `ACCESS-SIGNATURE` digest is encoded (hex by default).
    pub fn signature_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.signature_encoding = encoding;
        self
    }

    /// Set a custom user agent.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a preconfigured HTTP client, e.g. with timeouts or extra middleware.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> CoincheckClient {
        let dispatcher = match self.http_client {
            Some(client) => Dispatcher::new(client),
            None => {
                let user_agent = self
                    .user_agent
                    .unwrap_or_else(|| format!("coincheck-api-client/{}", env!("CARGO_PKG_VERSION")));
                Dispatcher::with_user_agent(&user_agent)
            }
        };

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        CoincheckClient {
            dispatcher,
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
            signature_encoding: self.signature_encoding,
        }
    }
}

impl Default for CoincheckClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// CoincheckApi trait implementation.

impl CoincheckApi for CoincheckClient {
    async fn get_ticker(&self) -> Result<Ticker, CoincheckError> {
        CoincheckClient::get_ticker(self).await
    }

    async fn get_trades(&self) -> Result<Vec<Trade>, CoincheckError> {
        CoincheckClient::get_trades(self).await
    }

    async fn get_order_book(&self) -> Result<OrderBook, CoincheckError> {
        CoincheckClient::get_order_book(self).await
    }

    async fn get_balance(&self) -> Result<Balance, CoincheckError> {
        CoincheckClient::get_balance(self).await
    }

    async fn get_leverage_balance(&self) -> Result<LeverageBalance, CoincheckError> {
        CoincheckClient::get_leverage_balance(self).await
    }

    async fn get_accounts(&self) -> Result<Accounts, CoincheckError> {
        CoincheckClient::get_accounts(self).await
    }

    async fn new_order(&self, request: &NewOrderRequest) -> Result<Order, CoincheckError> {
        CoincheckClient::new_order(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    #[test]
    fn test_envelope_success_false_is_api_error() {
        let body = br#"{"success": false, "error": "no balance"}"#;
        let err = check_envelope("/api/accounts/balance", body, Envelope::SuccessFlag).unwrap_err();
        assert_eq!(err.api_error().unwrap().message, "no balance");
    }

    #[test]
    fn test_envelope_missing_success_is_failure() {
        let err = check_envelope("/api/accounts", br#"{"id": 1}"#, Envelope::SuccessFlag).unwrap_err();
        assert!(err.api_error().is_some());
    }

    #[test]
    fn test_envelope_error_only() {
        assert!(check_envelope("/api/exchange/orders", br#"{"id": 1}"#, Envelope::ErrorOnly).is_ok());
        assert!(
            check_envelope("/api/exchange/orders", br#"{"id": 1, "error": ""}"#, Envelope::ErrorOnly)
                .is_ok()
        );
        let err = check_envelope(
            "/api/exchange/orders",
            br#"{"error": "Amount is too small"}"#,
            Envelope::ErrorOnly,
        )
        .unwrap_err();
        assert_eq!(err.api_error().unwrap().message, "Amount is too small");
    }

    #[test]
    fn test_envelope_none_skips_check() {
        assert!(check_envelope("/api/ticker", b"not json", Envelope::None).is_ok());
    }

    #[test]
    fn test_envelope_invalid_json_is_decode_error() {
        let err = check_envelope("/api/accounts", b"<html>", Envelope::SuccessFlag).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_public_headers_without_credentials() {
        let client = CoincheckClient::new();
        let headers = client.headers("https://coincheck.jp/api/ticker", "", false).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_private_headers_require_credentials() {
        let client = CoincheckClient::new();
        let err = client
            .headers("https://coincheck.jp/api/accounts", "", true)
            .unwrap_err();
        assert!(matches!(err, CoincheckError::MissingCredentials));
    }

    #[test]
    fn test_builder_trims_base_url() {
        let client = CoincheckClient::builder()
            .base_url("http://localhost:8080/")
            .credentials(Arc::new(StaticCredentials::new("k", "s")))
            .build();
        assert_eq!(client.base_url(), "http://localhost:8080");
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("has_credentials: true"));
        assert!(!debug_str.contains("\"s\""));
    }
}
