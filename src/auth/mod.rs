//! Authentication module for the Coincheck API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA256 signature generation for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use nonce::{IncreasingNonce, NonceProvider, SequenceNonce};
pub use signature::{SignatureEncoding, SignedHeaders, sign, signed_headers};
