//! Types for account and trading endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::OrderType;
use crate::types::serde_helpers::{decimal, option_decimal};

/// Spot account balance.
///
/// Amounts are decoded exactly from the exchange's text representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Balance {
    /// Available JPY.
    #[serde(with = "decimal")]
    pub jpy: Decimal,
    /// Available BTC.
    #[serde(with = "decimal")]
    pub btc: Decimal,
    /// JPY held by open orders.
    #[serde(with = "decimal")]
    pub jpy_reserved: Decimal,
    /// BTC held by open orders.
    #[serde(with = "decimal")]
    pub btc_reserved: Decimal,
    /// JPY pending lending.
    #[serde(with = "decimal")]
    pub jpy_lend_in_use: Decimal,
    /// BTC pending lending.
    #[serde(with = "decimal")]
    pub btc_lend_in_use: Decimal,
    /// JPY lent out.
    #[serde(with = "decimal")]
    pub jpy_lent: Decimal,
    /// BTC lent out.
    #[serde(with = "decimal")]
    pub btc_lent: Decimal,
    /// JPY borrowed.
    #[serde(with = "decimal")]
    pub jpy_debt: Decimal,
    /// BTC borrowed.
    #[serde(with = "decimal")]
    pub btc_debt: Decimal,
    /// Envelope flag, always `true` on a returned record.
    pub success: bool,
    /// Envelope error message.
    #[serde(default)]
    pub error: Option<String>,
}

/// An amount denominated in JPY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct JpyAmount {
    /// Amount in JPY.
    #[serde(with = "decimal")]
    pub jpy: Decimal,
}

/// Margin account balance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeverageBalance {
    /// Margin in use.
    pub margin: JpyAmount,
    /// Margin still available for new positions.
    pub margin_available: JpyAmount,
    /// Margin level (collateral ratio).
    #[serde(with = "decimal")]
    pub margin_level: Decimal,
    /// Envelope flag, always `true` on a returned record.
    pub success: bool,
    /// Envelope error message.
    #[serde(default)]
    pub error: Option<String>,
}

/// Account profile and fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Accounts {
    /// Account ID.
    pub id: u64,
    /// Registered email.
    pub email: String,
    /// KYC status, e.g. `identity_verified`.
    pub identity_status: String,
    /// Deposit address for BTC.
    #[serde(default)]
    pub bitcoin_address: Option<String>,
    /// Maximum leverage for lending.
    #[serde(with = "decimal")]
    pub lending_leverage: Decimal,
    /// Taker fee rate in percent.
    #[serde(with = "decimal")]
    pub taker_fee: Decimal,
    /// Maker fee rate in percent.
    #[serde(with = "decimal")]
    pub maker_fee: Decimal,
    /// Envelope flag, always `true` on a returned record.
    pub success: bool,
    /// Envelope error message.
    #[serde(default)]
    pub error: Option<String>,
}

/// Request to place a new order.
///
/// Decimal fields are sent as strings with the caller's scale, so
/// `"30010.0"` goes out as `"30010.0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrderRequest {
    /// Trading pair, e.g. `btc_jpy`.
    pub pair: String,
    /// Order type.
    pub order_type: OrderType,
    /// Limit rate.
    #[serde(skip_serializing_if = "Option::is_none", with = "option_decimal")]
    pub rate: Option<Decimal>,
    /// Amount in base currency.
    #[serde(skip_serializing_if = "Option::is_none", with = "option_decimal")]
    pub amount: Option<Decimal>,
    /// Amount in quote currency for `market_buy`.
    #[serde(skip_serializing_if = "Option::is_none", with = "option_decimal")]
    pub market_buy_amount: Option<Decimal>,
    /// Stop-loss trigger rate.
    #[serde(skip_serializing_if = "Option::is_none", with = "option_decimal")]
    pub stop_loss_rate: Option<Decimal>,
    /// Position to close, for `close_long`/`close_short`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<u64>,
}

impl NewOrderRequest {
    /// Create a new order request with no rate or amount set.
    pub fn new(pair: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            pair: pair.into(),
            order_type,
            rate: None,
            amount: None,
            market_buy_amount: None,
            stop_loss_rate: None,
            position_id: None,
        }
    }

    /// Limit order at `rate` for `amount`.
    pub fn limit(
        pair: impl Into<String>,
        order_type: OrderType,
        rate: Decimal,
        amount: Decimal,
    ) -> Self {
        Self::new(pair, order_type).rate(rate).amount(amount)
    }

    /// Market buy spending `market_buy_amount` of the quote currency.
    pub fn market_buy(pair: impl Into<String>, market_buy_amount: Decimal) -> Self {
        let mut request = Self::new(pair, OrderType::MarketBuy);
        request.market_buy_amount = Some(market_buy_amount);
        request
    }

    /// Market sell of `amount` base currency.
    pub fn market_sell(pair: impl Into<String>, amount: Decimal) -> Self {
        Self::new(pair, OrderType::MarketSell).amount(amount)
    }

    /// Set the rate.
    pub fn rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the amount.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the stop-loss rate.
    pub fn stop_loss_rate(mut self, rate: Decimal) -> Self {
        self.stop_loss_rate = Some(rate);
        self
    }

    /// Set the position to close.
    pub fn position_id(mut self, id: u64) -> Self {
        self.position_id = Some(id);
        self
    }
}

/// A placed order.
///
/// Built from the submitted [`NewOrderRequest`] with the response fields
/// applied on top, so attributes the exchange does not echo keep the
/// caller's values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    /// Order ID assigned by the exchange.
    pub id: u64,
    /// Trading pair.
    pub pair: String,
    /// Order type.
    pub order_type: OrderType,
    /// Limit rate.
    #[serde(default, with = "option_decimal")]
    pub rate: Option<Decimal>,
    /// Amount in base currency.
    #[serde(default, with = "option_decimal")]
    pub amount: Option<Decimal>,
    /// Amount in quote currency for market buys.
    #[serde(default, with = "option_decimal")]
    pub market_buy_amount: Option<Decimal>,
    /// Stop-loss trigger rate.
    #[serde(default, with = "option_decimal")]
    pub stop_loss_rate: Option<Decimal>,
    /// Closed position, if any.
    #[serde(default)]
    pub position_id: Option<u64>,
    /// Order creation time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Envelope flag.
    #[serde(default)]
    pub success: bool,
    /// Envelope error message.
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_balance_deserialize() {
        let json = r#"{
            "success": true,
            "jpy": "0.8401", "btc": "7.75052654",
            "jpy_reserved": "3000.0", "btc_reserved": "3.5002",
            "jpy_lend_in_use": "0", "btc_lend_in_use": "0.3",
            "jpy_lent": "0", "btc_lent": "1.2",
            "jpy_debt": "0", "btc_debt": "0"
        }"#;
        let balance: Balance = serde_json::from_str(json).unwrap();
        assert!(balance.success);
        assert!(balance.error.is_none());
        assert_eq!(balance.btc.to_string(), "7.75052654");
        assert_eq!(balance.jpy_reserved, Decimal::from(3000));
    }

    #[test]
    fn test_leverage_balance_mixed_numbers() {
        let json = r#"{
            "success": true,
            "margin": {"jpy": 131767.22675655},
            "margin_available": {"jpy": "116995.98446494"},
            "margin_level": 8.36
        }"#;
        let balance: LeverageBalance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.margin.jpy.to_string(), "131767.22675655");
        assert_eq!(balance.margin_available.jpy.to_string(), "116995.98446494");
        assert_eq!(balance.margin_level, Decimal::from_str("8.36").unwrap());
    }

    #[test]
    fn test_accounts_deserialize() {
        let json = r#"{
            "success": true, "id": 10000, "email": "test@example.com",
            "identity_status": "identity_pending", "bitcoin_address": null,
            "lending_leverage": "4", "taker_fee": "0", "maker_fee": "0"
        }"#;
        let accounts: Accounts = serde_json::from_str(json).unwrap();
        assert_eq!(accounts.id, 10000);
        assert!(accounts.bitcoin_address.is_none());
        assert_eq!(accounts.lending_leverage, Decimal::from(4));
    }

    #[test]
    fn test_new_order_request_serialize() {
        let request = NewOrderRequest::limit(
            "btc_jpy",
            OrderType::Buy,
            Decimal::from_str("30010.0").unwrap(),
            Decimal::from_str("1.3").unwrap(),
        );
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"pair":"btc_jpy","order_type":"buy","rate":"30010.0","amount":"1.3"}"#
        );
    }

    #[test]
    fn test_market_buy_request_omits_rate() {
        let request = NewOrderRequest::market_buy("btc_jpy", Decimal::from(10000));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["order_type"], "market_buy");
        assert_eq!(json["market_buy_amount"], "10000");
        assert!(json.get("rate").is_none());
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn test_order_deserialize() {
        let json = r#"{
            "success": true, "id": 12345, "rate": "30010.0", "amount": "1.3",
            "order_type": "sell", "stop_loss_rate": null, "pair": "btc_jpy",
            "created_at": "2015-01-10T05:55:38.000Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 12345);
        assert_eq!(order.order_type, OrderType::Sell);
        assert_eq!(order.rate.unwrap().to_string(), "30010.0");
        assert!(order.stop_loss_rate.is_none());
        assert!(order.created_at.is_some());
    }
}
