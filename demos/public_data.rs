//! Example: Fetching public market data from Coincheck.
//!
//! Run with: cargo run --example public_data
//! Set `RUST_LOG=coincheck_api_client=debug` to see request tracing.

use coincheck_api_client::rest::CoincheckClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Create a client for public endpoints (no credentials needed)
    let client = CoincheckClient::new();

    println!("=== Ticker ===");
    let ticker = client.get_ticker().await?;
    println!("Last: {}  Bid: {}  Ask: {}", ticker.last, ticker.bid, ticker.ask);
    println!("24h high/low: {} / {}", ticker.high, ticker.low);
    println!("Volume: {}", ticker.volume);

    println!("\n=== Order Book ===");
    let book = client.get_order_book().await?;
    for level in book.asks.iter().take(5).rev() {
        println!("  ask {:>12} x {}", level.rate(), level.amount());
    }
    for level in book.bids.iter().take(5) {
        println!("  bid {:>12} x {}", level.rate(), level.amount());
    }
    if let Some(spread) = book.spread() {
        println!("Spread: {}", spread);
    }

    println!("\n=== Recent Trades ===");
    let trades = client.get_trades().await?;
    for trade in trades.iter().take(5) {
        println!(
            "#{} {} {} @ {} ({})",
            trade.id, trade.order_type, trade.amount, trade.rate, trade.created_at
        );
    }

    Ok(())
}
