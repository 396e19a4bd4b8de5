//! Account and trading endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Coincheck reports most failures here with HTTP 200 and a
//! `{"success": false, "error": "..."}` body; those surface as
//! [`CoincheckError::Api`].

mod types;

pub use types::*;

use serde_json::Value;

use crate::error::{CoincheckError, RequestError};
use crate::rest::CoincheckClient;
use crate::rest::client::{Envelope, check_envelope, decode};
use crate::rest::endpoints::private;

impl CoincheckClient {
    /// Get the spot account balance.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coincheck_api_client::rest::CoincheckClient;
    /// use coincheck_api_client::auth::StaticCredentials;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = CoincheckClient::builder().credentials(credentials).build();
    ///
    ///     let balance = client.get_balance().await?;
    ///     println!("JPY {} (reserved {})", balance.jpy, balance.jpy_reserved);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_balance(&self) -> Result<Balance, CoincheckError> {
        self.private_get(private::BALANCE, Envelope::SuccessFlag)
            .await
    }

    /// Get the margin account balance.
    pub async fn get_leverage_balance(&self) -> Result<LeverageBalance, CoincheckError> {
        self.private_get(private::LEVERAGE_BALANCE, Envelope::SuccessFlag)
            .await
    }

    /// Get the account profile.
    pub async fn get_accounts(&self) -> Result<Accounts, CoincheckError> {
        self.private_get(private::ACCOUNTS, Envelope::SuccessFlag)
            .await
    }

    /// Place a new order.
    ///
    /// The request is sent as the JSON body and is part of the signature.
    /// The returned [`Order`] is the request with the response applied on
    /// top, carrying the exchange-assigned `id`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coincheck_api_client::rest::CoincheckClient;
    /// use coincheck_api_client::rest::private::NewOrderRequest;
    /// use coincheck_api_client::auth::StaticCredentials;
    /// use coincheck_api_client::types::OrderType;
    /// use rust_decimal::Decimal;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = CoincheckClient::builder().credentials(credentials).build();
    ///
    ///     let request = NewOrderRequest::limit(
    ///         "btc_jpy",
    ///         OrderType::Buy,
    ///         "3000000".parse::<Decimal>()?,
    ///         "0.005".parse::<Decimal>()?,
    ///     );
    ///     let order = client.new_order(&request).await?;
    ///     println!("Placed order {}", order.id);
    ///     Ok(())
    /// }
    /// ```
    pub async fn new_order(&self, request: &NewOrderRequest) -> Result<Order, CoincheckError> {
        let body = self.private_post(private::ORDERS, request).await?;
        check_envelope(private::ORDERS, &body, Envelope::ErrorOnly)?;

        let response: Value = decode(&body)?;
        let mut order = serde_json::to_value(request).map_err(RequestError::Encode)?;
        overlay(&mut order, response);

        serde_json::from_value(order).map_err(|source| CoincheckError::Decode {
            source,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// Copy every non-null field of `response` onto `base`.
fn overlay(base: &mut Value, response: Value) {
    if let (Value::Object(base), Value::Object(fields)) = (base, response) {
        for (key, value) in fields {
            if !value.is_null() {
                base.insert(key, value);
            }
        }
    }
}
