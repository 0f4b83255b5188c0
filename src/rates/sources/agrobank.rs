use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::errors::Result;
use crate::rates::source::RateSource;
use crate::rates::types::ExchangeRate;

pub const BANK: &str = "AgroBank";

/// AgroBank placeholder. The site is a client-rendered React application,
/// so there is nothing for a static scraper to read; the route exists and
/// always answers with zero rates (the UI shows "-").
///
/// TODO: scrape via a headless browser or find the JSON endpoint the React
/// app itself calls.
pub struct AgroBank;

#[async_trait]
impl RateSource for AgroBank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, _client: &Client) -> Result<Vec<ExchangeRate>> {
        info!("AgroBank: dynamic site, returning empty rates");
        Ok(Vec::new())
    }
}
