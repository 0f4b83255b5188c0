use serde::{Deserialize, Serialize};
use std::env;

use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};
use crate::errors::{BotError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Rates bot
    pub telegram_bot_token: String,

    // Document extraction bot (optional, runs only when configured)
    pub extract_bot_token: Option<String>,
    pub ocr_api_url: Option<String>,
    pub ocr_api_key: Option<String>,

    // HTTP server for the web UI
    pub server_host: String,
    pub server_port: u16,

    // Outbound HTTP
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|_| BotError::config("TELEGRAM_BOT_TOKEN not set"))?,

            extract_bot_token: env::var("EXTRACT_BOT_TOKEN").ok(),
            ocr_api_url: env::var("OCR_API_URL").ok(),
            ocr_api_key: env::var("OCR_API_KEY").ok(),

            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SERVER_PORT),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram_bot_token.is_empty() {
            return Err(BotError::config("Telegram bot token is required"));
        }

        // The extraction bot needs its OCR backend; a token without one is a
        // misconfiguration rather than a feature toggle.
        if self.extract_bot_token.is_some() && self.ocr_api_url.is_none() {
            return Err(BotError::config(
                "EXTRACT_BOT_TOKEN set but OCR_API_URL missing",
            ));
        }

        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
