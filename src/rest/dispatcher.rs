//! HTTP dispatch for signed Coincheck requests.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::error::RequestError;

/// Executes one HTTP call per [`Dispatcher::request`] and returns the raw body.
///
/// Connection pooling and TLS are left to the wrapped client. Cloning is cheap
/// and clones share the same connection pool.
#[derive(Clone)]
pub struct Dispatcher {
    http_client: ClientWithMiddleware,
}

impl Dispatcher {
    /// Wrap an existing middleware client.
    pub fn new(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }

    /// Build the default transport: reqwest with request tracing.
    pub fn with_user_agent(user_agent: &str) -> Self {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coincheck-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Self::new(client)
    }

    /// Send `body` to `url` with `headers` attached verbatim.
    ///
    /// An empty body is not sent at all. The response is read to the end
    /// whatever its status code; interpreting it is up to the caller.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: String,
        headers: HeaderMap,
    ) -> Result<Vec<u8>, RequestError> {
        let url = Url::parse(url)?;
        tracing::debug!(%method, %url, body_len = body.len(), "sending request");

        let mut request = self.http_client.request(method, url).headers(headers);
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%status, len = bytes.len(), "received response");

        Ok(bytes.to_vec())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_url_is_request_error() {
        let dispatcher = Dispatcher::with_user_agent("test");
        let err = dispatcher
            .request(Method::GET, "not a url/api/ticker", String::new(), HeaderMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dispatcher = Dispatcher::with_user_agent("test");
        let err = dispatcher
            .request(
                Method::GET,
                &format!("http://{addr}/api/ticker"),
                String::new(),
                HeaderMap::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }
}
