//! Example: Issuing calls against a Captain instance
//!
//! Loads configuration from the environment (or a `captain.{json,toml}`
//! file), logs in, and issues one call.
//!
//! # Setup
//!
//! ```bash
//! export CAPTAIN_BASE_URL=http://captain.localhost:3000/api/v2
//! export CAPTAIN_PASSWORD=captain42
//! cargo run --example issue_request -- /user/system/info
//! ```
//!
//! A `.env` file in the working directory is read as well.

use anyhow::Context;
use captain_infra::{config, init_tracing, CaptainClient, LogFormat};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("info", LogFormat::Text)?;

    let endpoint = std::env::args().nth(1).unwrap_or_else(|| "/user/system/info".to_string());

    let config = config::load().context("loading client configuration")?;
    let client = CaptainClient::new(config.clone())?;

    client.login(&config.password).await.context("logging in")?;
    tracing::info!(endpoint = %endpoint, "Logged in, issuing call");

    let data = client.get(&endpoint, json!({})).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);

    client.destroy();
    Ok(())
}
