use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::constants::MAJOR_CURRENCIES;
use crate::errors::{BotError, Result};
use crate::rates::source::{get_json, RateSource};
use crate::rates::types::ExchangeRate;

const URL: &str = "https://api-dbo.hamkorbank.uz/webflow/v1/exchanges";
pub const BANK: &str = "Hamkorbank";

#[derive(Debug, Deserialize)]
struct ExchangesResponse {
    status: String,
    error_code: i64,
    #[serde(default)]
    error_note: String,
    data: Vec<ExchangeEntry>,
}

#[derive(Debug, Deserialize)]
struct ExchangeEntry {
    currency_char: String,
    selling_rate: f64,
    buying_rate: f64,
    begin_date: String,
}

/// Hamkorbank internet-banking exchange feed. Quotes are already UZS per
/// 100 units.
pub struct Hamkorbank;

#[async_trait]
impl RateSource for Hamkorbank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let response = get_json(client, URL).await?;
        if !response.status().is_success() {
            return Err(BotError::bank_api(format!(
                "Hamkorbank API error: {}",
                response.status()
            )));
        }

        let body: ExchangesResponse = response.json().await?;
        let rates = Self::select_rates(body)?;
        debug!("Hamkorbank rates fetched: {}", rates.len());
        Ok(rates)
    }
}

impl Hamkorbank {
    /// Keep USD/EUR/RUB only. The feed repeats currencies across exchange
    /// destinations; for each currency keep the quote with the tightest
    /// buy/sell spread.
    fn select_rates(body: ExchangesResponse) -> Result<Vec<ExchangeRate>> {
        if body.status != "Success" || body.error_code != 0 {
            return Err(BotError::bank_api(format!(
                "Hamkorbank API error: {}",
                body.error_note
            )));
        }

        let mut rates: Vec<ExchangeRate> = Vec::new();
        for entry in body.data {
            if !MAJOR_CURRENCIES.contains(&entry.currency_char.as_str()) {
                continue;
            }
            let candidate = ExchangeRate::new(
                BANK,
                &entry.currency_char,
                entry.buying_rate,
                entry.selling_rate,
                &entry.begin_date,
            );
            match rates.iter_mut().find(|r| r.currency == candidate.currency) {
                Some(existing) => {
                    let existing_spread = (existing.sell - existing.buy).abs();
                    let candidate_spread = (candidate.sell - candidate.buy).abs();
                    if candidate_spread < existing_spread {
                        *existing = candidate;
                    }
                }
                None => rates.push(candidate),
            }
        }
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(currency: &str, buy: f64, sell: f64) -> ExchangeEntry {
        ExchangeEntry {
            currency_char: currency.to_string(),
            selling_rate: sell,
            buying_rate: buy,
            begin_date: "2024-01-15".to_string(),
        }
    }

    fn ok_response(data: Vec<ExchangeEntry>) -> ExchangesResponse {
        ExchangesResponse {
            status: "Success".to_string(),
            error_code: 0,
            error_note: String::new(),
            data,
        }
    }

    #[test]
    fn test_filters_to_major_currencies() {
        let body = ok_response(vec![
            entry("USD", 12450.0, 12600.0),
            entry("GBP", 15800.0, 16100.0),
            entry("RUB", 150.0, 161.0),
        ]);
        let rates = Hamkorbank::select_rates(body).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].currency, "USD");
        assert_eq!(rates[1].currency, "RUB");
    }

    #[test]
    fn test_keeps_tightest_spread_for_duplicates() {
        let body = ok_response(vec![
            entry("USD", 12400.0, 12700.0),
            entry("USD", 12500.0, 12600.0),
        ]);
        let rates = Hamkorbank::select_rates(body).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].buy, 12500.0);
        assert_eq!(rates[0].sell, 12600.0);
    }

    #[test]
    fn test_api_level_error_is_rejected() {
        let body = ExchangesResponse {
            status: "Error".to_string(),
            error_code: 7,
            error_note: "maintenance".to_string(),
            data: vec![],
        };
        assert!(Hamkorbank::select_rates(body).is_err());
    }
}
