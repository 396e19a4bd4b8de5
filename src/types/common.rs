//! Common domain types for the Coincheck API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    /// Buy side
    Buy,
    /// Sell side
    Sell,
}

impl std::fmt::Display for BuySell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuySell::Buy => write!(f, "buy"),
            BuySell::Sell => write!(f, "sell"),
        }
    }
}

/// Order type accepted by `POST /api/exchange/orders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Limit buy, requires `rate` and `amount`
    Buy,
    /// Limit sell, requires `rate` and `amount`
    Sell,
    /// Market buy, requires `market_buy_amount` in quote currency
    MarketBuy,
    /// Market sell, requires `amount`
    MarketSell,
    /// Open a long margin position
    LeverageBuy,
    /// Open a short margin position
    LeverageSell,
    /// Close a long margin position
    CloseLong,
    /// Close a short margin position
    CloseShort,
}

impl OrderType {
    /// Whether the order is priced by the market rather than a `rate`.
    pub fn is_market(&self) -> bool {
        matches!(self, OrderType::MarketBuy | OrderType::MarketSell)
    }

    /// Side of the book the order lands on.
    pub fn side(&self) -> BuySell {
        match self {
            OrderType::Buy
            | OrderType::MarketBuy
            | OrderType::LeverageBuy
            | OrderType::CloseShort => BuySell::Buy,
            OrderType::Sell
            | OrderType::MarketSell
            | OrderType::LeverageSell
            | OrderType::CloseLong => BuySell::Sell,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
            OrderType::MarketBuy => "market_buy",
            OrderType::MarketSell => "market_sell",
            OrderType::LeverageBuy => "leverage_buy",
            OrderType::LeverageSell => "leverage_sell",
            OrderType::CloseLong => "close_long",
            OrderType::CloseShort => "close_short",
        };
        write!(f, "{}", s)
    }
}

/// Well-known trading pair identifiers.
pub mod pairs {
    pub const BTC_JPY: &str = "btc_jpy";
    pub const ETH_JPY: &str = "eth_jpy";
    pub const ETC_JPY: &str = "etc_jpy";
    pub const XRP_JPY: &str = "xrp_jpy";
}
