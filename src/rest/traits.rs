//! Trait definition for the Coincheck REST API client.
//!
//! [`CoincheckApi`] abstracts every endpoint operation so that callers can
//! depend on the trait and swap in a mock or a decorating wrapper.
//!
//! # Example
//!
//! ```rust,ignore
//! use coincheck_api_client::rest::{CoincheckApi, CoincheckClient};
//!
//! async fn print_spread<C: CoincheckApi>(client: &C) -> Result<(), coincheck_api_client::CoincheckError> {
//!     let ticker = client.get_ticker().await?;
//!     println!("Spread: {}", ticker.ask - ticker.bid);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::CoincheckError;
use crate::rest::private::{Accounts, Balance, LeverageBalance, NewOrderRequest, Order};
use crate::rest::public::{OrderBook, Ticker, Trade};

/// Trait defining all Coincheck REST API operations.
///
/// All methods are async and return `Result<T, CoincheckError>`.
pub trait CoincheckApi: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get the latest ticker.
    fn get_ticker(&self) -> impl Future<Output = Result<Ticker, CoincheckError>> + Send;

    /// Get recent trades.
    fn get_trades(&self) -> impl Future<Output = Result<Vec<Trade>, CoincheckError>> + Send;

    /// Get the order book snapshot.
    fn get_order_book(&self) -> impl Future<Output = Result<OrderBook, CoincheckError>> + Send;

    // ========== Private Endpoints ==========

    /// Get the spot account balance.
    fn get_balance(&self) -> impl Future<Output = Result<Balance, CoincheckError>> + Send;

    /// Get the margin account balance.
    fn get_leverage_balance(
        &self,
    ) -> impl Future<Output = Result<LeverageBalance, CoincheckError>> + Send;

    /// Get the account profile.
    fn get_accounts(&self) -> impl Future<Output = Result<Accounts, CoincheckError>> + Send;

    /// Place a new order.
    fn new_order(
        &self,
        request: &NewOrderRequest,
    ) -> impl Future<Output = Result<Order, CoincheckError>> + Send;
}
