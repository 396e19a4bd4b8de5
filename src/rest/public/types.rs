//! Types for market data endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::types::BuySell;
use crate::types::serde_helpers::decimal;

/// Latest ticker.
///
/// Price quotes are plain numbers on the wire and are kept as `f64`;
/// `volume` arrives as text and is decoded exactly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    /// Last traded price.
    pub last: f64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Highest price in the last 24 hours.
    pub high: f64,
    /// Lowest price in the last 24 hours.
    pub low: f64,
    /// 24 hour volume.
    #[serde(with = "decimal")]
    pub volume: Decimal,
    /// Unix timestamp of the snapshot.
    pub timestamp: u64,
}

impl Ticker {
    /// Difference between best ask and best bid.
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

/// A public trade.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trade {
    /// Trade ID.
    pub id: u64,
    /// Traded amount in base currency.
    #[serde(with = "decimal")]
    pub amount: Decimal,
    /// Execution rate.
    #[serde(with = "decimal")]
    pub rate: Decimal,
    /// Taker side.
    pub order_type: BuySell,
    /// Trading pair, when the exchange reports it.
    #[serde(default)]
    pub pair: Option<String>,
    /// Execution time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Trades in the paginated `{"success":..,"data":[..]}` form.
#[derive(Debug, Deserialize)]
pub(crate) struct TradesPage {
    pub data: Vec<Trade>,
}

/// One price level: `[rate, amount]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderBookLevel(
    #[serde(with = "decimal")] pub Decimal,
    #[serde(with = "decimal")] pub Decimal,
);

impl OrderBookLevel {
    /// Price of the level.
    pub fn rate(&self) -> Decimal {
        self.0
    }

    /// Quantity resting at the level.
    pub fn amount(&self) -> Decimal {
        self.1
    }
}

/// Order book snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderBook {
    /// Sell side, best first.
    pub asks: Vec<OrderBookLevel>,
    /// Buy side, best first.
    pub bids: Vec<OrderBookLevel>,
}

impl OrderBook {
    /// Lowest ask, if any.
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Highest bid, if any.
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    /// Best ask minus best bid.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.rate() - self.best_bid()?.rate())
    }
}
