//! Coincheck REST API endpoint constants.

/// Base URL for the Coincheck REST API.
pub const COINCHECK_BASE_URL: &str = "https://coincheck.jp";

/// Public endpoints (market data).
pub mod public {
    /// Get the latest ticker.
    pub const TICKER: &str = "/api/ticker";
    /// Get recent trades.
    pub const TRADES: &str = "/api/trades";
    /// Get the order book snapshot.
    pub const ORDER_BOOKS: &str = "/api/order_books";
}

/// Private endpoints (authentication required).
pub mod private {
    /// Get account balance.
    pub const BALANCE: &str = "/api/accounts/balance";
    /// Get margin account balance.
    pub const LEVERAGE_BALANCE: &str = "/api/accounts/leverage_balance";
    /// Get account profile.
    pub const ACCOUNTS: &str = "/api/accounts";
    /// Place a new order.
    pub const ORDERS: &str = "/api/exchange/orders";
}
