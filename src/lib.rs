//! # Coincheck Client
//!
//! An async Rust client library for the Coincheck exchange REST API.
//!
//! ## Features
//!
//! - Signed requests (`ACCESS-KEY`, `ACCESS-NONCE`, `ACCESS-SIGNATURE`) using HMAC-SHA256
//! - Strictly increasing nonces, safe under concurrent use
//! - Strong typing for ticker, trades, order book, balances, account and orders
//! - Exchange `success`/`error` envelopes surfaced as typed errors
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coincheck_api_client::rest::CoincheckClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoincheckClient::new();
//!     let ticker = client.get_ticker().await?;
//!     println!("Ticker: {:?}", ticker);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, CoincheckError, RequestError};
pub use rest::{CoincheckApi, CoincheckClient};
pub use types::common::{BuySell, OrderType};

/// Result type alias using CoincheckError
pub type Result<T> = std::result::Result<T, CoincheckError>;
