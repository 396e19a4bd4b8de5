//! Example: Private account endpoints.
//!
//! Reads `COINCHECK_API_KEY` and `COINCHECK_API_SECRET` from the environment
//! or a `.env` file.
//!
//! Run with: cargo run --example private_account

use std::sync::Arc;

use coincheck_api_client::CoincheckError;
use coincheck_api_client::auth::{EnvCredentials, IncreasingNonce};
use coincheck_api_client::rest::CoincheckClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set COINCHECK_API_KEY and COINCHECK_API_SECRET to run this example.");
            return Ok(());
        }
    };

    let client = CoincheckClient::builder()
        .credentials(credentials)
        .nonce_provider(Arc::new(IncreasingNonce::new()))
        .user_agent("coincheck-api-client-examples/private_account")
        .build();

    println!("=== Account ===");
    let accounts = client.get_accounts().await?;
    println!("ID: {}  Status: {}", accounts.id, accounts.identity_status);
    println!("Fees: taker {}% / maker {}%", accounts.taker_fee, accounts.maker_fee);

    println!("\n=== Balance ===");
    let balance = client.get_balance().await?;
    println!("JPY: {} (reserved {})", balance.jpy, balance.jpy_reserved);
    println!("BTC: {} (reserved {})", balance.btc, balance.btc_reserved);

    println!("\n=== Leverage Balance ===");
    match client.get_leverage_balance().await {
        Ok(leverage) => {
            println!("Margin: {} JPY", leverage.margin.jpy);
            println!("Available: {} JPY", leverage.margin_available.jpy);
            println!("Margin level: {}", leverage.margin_level);
        }
        Err(CoincheckError::Api(e)) => println!("Not available: {}", e),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
