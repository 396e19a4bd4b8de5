//! HMAC-SHA256 signature generation for Coincheck API authentication.
//!
//! Coincheck authenticated requests carry a signature computed as:
//! ```text
//! HMAC-SHA256(nonce + uri + body, api_secret)
//! ```
//!
//! where `uri` is the full request URL and `body` is empty for GET requests.
//! The digest is sent hex-encoded in the `ACCESS-SIGNATURE` header. Some API
//! generations expect base64 instead, see [`SignatureEncoding`].

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::CoincheckError;

type HmacSha256 = Hmac<Sha256>;

/// `ACCESS-KEY` header.
pub const ACCESS_KEY: HeaderName = HeaderName::from_static("access-key");
/// `ACCESS-NONCE` header.
pub const ACCESS_NONCE: HeaderName = HeaderName::from_static("access-nonce");
/// `ACCESS-SIGNATURE` header.
pub const ACCESS_SIGNATURE: HeaderName = HeaderName::from_static("access-signature");

/// Text encoding of the HMAC digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// Lowercase hexadecimal, 64 characters
    #[default]
    Hex,
    /// Standard base64 with padding, 44 characters
    Base64,
}

/// Sign a request for Coincheck's API.
///
/// # Arguments
///
/// * `secret` - The API secret, used as raw HMAC key bytes
/// * `nonce` - The nonce value for this request
/// * `uri` - The full request URL (e.g., "https://coincheck.jp/api/accounts/balance")
/// * `body` - The JSON request body, empty for GET requests
/// * `encoding` - How the digest is rendered
///
/// # Example
///
/// ```rust
/// use coincheck_api_client::auth::{SignatureEncoding, sign};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signature = sign(
///     "api_secret",
///     1700000000,
///     "https://coincheck.jp/api/accounts/balance",
///     "",
///     SignatureEncoding::Hex,
/// )?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign(
    secret: &str,
    nonce: u64,
    uri: &str,
    body: &str,
    encoding: SignatureEncoding,
) -> Result<String, CoincheckError> {
    let message = format!("{nonce}{uri}{body}");
    let digest = hmac_sha256(secret.as_bytes(), message.as_bytes())?;

    Ok(match encoding {
        SignatureEncoding::Hex => hex::encode(digest),
        SignatureEncoding::Base64 => BASE64.encode(digest),
    })
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>, CoincheckError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CoincheckError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Authentication headers for a single request.
///
/// Computed fresh for every call and never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of `ACCESS-KEY`
    pub key: String,
    /// Value of `ACCESS-NONCE`
    pub nonce: String,
    /// Value of `ACCESS-SIGNATURE`
    pub signature: String,
}

impl SignedHeaders {
    /// Render the headers for the transport, including `Content-Type`.
    pub fn to_header_map(&self) -> Result<HeaderMap, CoincheckError> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in [
            (ACCESS_KEY, &self.key),
            (ACCESS_NONCE, &self.nonce),
            (ACCESS_SIGNATURE, &self.signature),
        ] {
            let value = HeaderValue::from_str(value)
                .map_err(|_| CoincheckError::Auth(format!("{name} is not a valid header value")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("key", &self.key)
            .field("nonce", &self.nonce)
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

/// Compute the full header set for one request.
pub fn signed_headers(
    credentials: &Credentials,
    nonce: u64,
    uri: &str,
    body: &str,
    encoding: SignatureEncoding,
) -> Result<SignedHeaders, CoincheckError> {
    let signature = sign(credentials.expose_secret(), nonce, uri, body, encoding)?;
    Ok(SignedHeaders {
        key: credentials.api_key.clone(),
        nonce: nonce.to_string(),
        signature,
    })
}
