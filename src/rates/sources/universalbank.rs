use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{BotError, Result};
use crate::rates::parse::parse_spaced;
use crate::rates::source::{get_json, RateSource};
use crate::rates::types::{today_iso, ExchangeRate};

pub const BANK: &str = "Universal Bank";

/// onmap.uz bank id for Universal Bank.
const ONMAP_BANK_ID: u32 = 25;

#[derive(Debug, Deserialize)]
struct ChartPoint {
    date: String,
    buying: String,
    selling: String,
}

/// Universal Bank via the onmap.uz chart feed: one request per currency,
/// the last chart point is the current quote. Values come as strings with
/// space grouping and are already UZS per 100 units.
pub struct UniversalBank;

#[async_trait]
impl RateSource for UniversalBank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let mut rates = Vec::new();

        for currency in ["usd", "eur", "rub"] {
            let url = format!(
                "https://onmap.uz/api/chart?code={}&count=31&bank={}",
                currency, ONMAP_BANK_ID
            );

            // One bad currency must not sink the other two.
            let points: Vec<ChartPoint> = match self.fetch_chart(client, &url).await {
                Ok(points) => points,
                Err(e) => {
                    warn!("Universal Bank {} chart failed: {}", currency, e);
                    continue;
                }
            };

            if let Some(rate) = Self::latest_rate(&points, &currency.to_uppercase()) {
                rates.push(rate);
            } else {
                warn!("Universal Bank: no usable {} chart point", currency);
            }
        }

        debug!("Universal Bank rates fetched: {}", rates.len());
        Ok(rates)
    }

    fn fallback_on_empty(&self) -> Option<Vec<ExchangeRate>> {
        let today = today_iso();
        Some(vec![
            ExchangeRate::new(BANK, "USD", 12450.0, 12650.0, &today),
            ExchangeRate::new(BANK, "EUR", 13000.0, 15200.0, &today),
            ExchangeRate::new(BANK, "RUB", 150.0, 161.0, &today),
        ])
    }

    fn fallback_on_error(&self) -> Option<Vec<ExchangeRate>> {
        let today = today_iso();
        Some(vec![
            ExchangeRate::new(BANK, "USD", 1_245_000.0, 1_265_000.0, &today),
            ExchangeRate::new(BANK, "EUR", 1_300_000.0, 1_520_000.0, &today),
            ExchangeRate::new(BANK, "RUB", 15_000.0, 16_100.0, &today),
        ])
    }
}

impl UniversalBank {
    async fn fetch_chart(&self, client: &Client, url: &str) -> Result<Vec<ChartPoint>> {
        let response = get_json(client, url).await?;
        if !response.status().is_success() {
            return Err(BotError::bank_api(format!(
                "Universal Bank API error: {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    fn latest_rate(points: &[ChartPoint], currency: &str) -> Option<ExchangeRate> {
        let latest = points.last()?;
        let buy = parse_spaced(&latest.buying)?;
        let sell = parse_spaced(&latest.selling)?;
        Some(ExchangeRate::new(BANK, currency, buy, sell, &latest.date))
    }
}
