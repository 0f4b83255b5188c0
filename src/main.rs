use anyhow::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use somkurs_bot::{
    bot::RatesBot,
    extract::{ExtractBot, OcrClient},
    server::RatesServer,
    utils::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚀 Starting somkurs-bot v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_env()?);
    config.validate()?;

    // One shared outbound client for every bank fetch and the OCR service.
    let client = Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    // Rates API for the web UI.
    let server = RatesServer::new(Arc::clone(&config), client.clone());
    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Rates API server stopped: {}", e);
        }
    });

    // Optional document extraction bot, entirely separate from rates.
    if let (Some(token), Some(ocr_url)) = (
        config.extract_bot_token.clone(),
        config.ocr_api_url.clone(),
    ) {
        let ocr = Arc::new(OcrClient::new(
            client.clone(),
            ocr_url,
            config.ocr_api_key.clone(),
        ));
        let extract_bot = ExtractBot::new(token, ocr);
        tokio::spawn(async move {
            if let Err(e) = extract_bot.run().await {
                error!("Extraction bot stopped: {}", e);
            }
        });
    }

    // The rates bot owns the foreground; ctrl-c shuts the process down.
    RatesBot::new(config, client).run().await?;

    Ok(())
}
