//! Market data endpoints.
//!
//! These endpoints do not require credentials, but are signed when the
//! client has them.

mod types;

pub use types::*;

use reqwest::Method;

use crate::error::CoincheckError;
use crate::rest::CoincheckClient;
use crate::rest::client::{Envelope, check_envelope, decode};
use crate::rest::endpoints::public;

impl CoincheckClient {
    /// Get the latest ticker.
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
    ///     println!("bid {} / ask {}", ticker.bid, ticker.ask);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_ticker(&self) -> Result<Ticker, CoincheckError> {
        self.public_get(public::TICKER).await
    }

    /// Get recent trades.
    ///
    /// Accepts both the bare array and the paginated `data` form. The
    /// paginated form carries a `success` flag, which is checked.
    pub async fn get_trades(&self) -> Result<Vec<Trade>, CoincheckError> {
        let body = self
            .execute(Method::GET, public::TRADES, String::new(), false)
            .await?;

        if body.trim_ascii_start().first() == Some(&b'[') {
            return decode(&body);
        }

        check_envelope(public::TRADES, &body, Envelope::SuccessFlag)?;
        let page: TradesPage = decode(&body)?;
        Ok(page.data)
    }

    /// Get the order book snapshot.
    pub async fn get_order_book(&self) -> Result<OrderBook, CoincheckError> {
        self.public_get(public::ORDER_BOOKS).await
    }
}
