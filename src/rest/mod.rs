//! Coincheck REST API client.
//!
//! Request flow for every endpoint:
//!
//! ```text
//! endpoint method -> signer (nonce, ACCESS-* headers) -> Dispatcher (one HTTP call)
//!                 -> decode JSON -> success/error envelope check
//! ```
//!
//! # Trait-based API
//!
//! The [`CoincheckApi`] trait abstracts all REST operations, enabling mock
//! implementations for testing and wrapping with decorators.

mod client;
mod dispatcher;
mod endpoints;
pub mod private;
pub mod public;
mod traits;

pub use client::{CoincheckClient, CoincheckClientBuilder};
pub use dispatcher::Dispatcher;
pub use endpoints::COINCHECK_BASE_URL;
pub use traits::CoincheckApi;
