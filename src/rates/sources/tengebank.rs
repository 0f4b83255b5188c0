use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error};

use crate::constants::MAJOR_CURRENCIES;
use crate::errors::{BotError, Result};
use crate::rates::source::{get_json, RateSource};
use crate::rates::types::{today_iso, ExchangeRate};

const URL: &str = "https://tengebank.uz/api/exchangerates/tables";
pub const BANK: &str = "Tenge Bank";

#[derive(Debug, Deserialize)]
struct TablesResponse {
    personal: Vec<PersonalTable>,
}

#[derive(Debug, Deserialize)]
struct PersonalTable {
    date: String,
    currency: HashMap<String, BuySell>,
}

#[derive(Debug, Deserialize)]
struct BuySell {
    buy: f64,
    sell: f64,
}

/// Tenge Bank personal-rates table. Values are taken exactly as the API
/// reports them; zero quotes mean "not traded today" and are skipped.
pub struct TengeBank;

#[async_trait]
impl RateSource for TengeBank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let response = get_json(client, URL).await?;
        if !response.status().is_success() {
            // A bad status yields no rates and lands on the empty-tier
            // fallback; the error tier is reserved for transport and
            // decode failures.
            error!("Tenge Bank API error: {}", response.status());
            return Ok(Vec::new());
        }

        let body: TablesResponse = response
            .json()
            .await
            .map_err(|e| BotError::bank_api(format!("Tenge Bank response decode: {}", e)))?;
        let rates = Self::select_rates(&body);
        debug!("Tenge Bank rates fetched: {}", rates.len());
        Ok(rates)
    }

    fn fallback_on_empty(&self) -> Option<Vec<ExchangeRate>> {
        let today = today_iso();
        Some(vec![
            ExchangeRate::new(BANK, "USD", 12480.0, 12620.0, &today),
            ExchangeRate::new(BANK, "EUR", 14100.0, 14700.0, &today),
            ExchangeRate::new(BANK, "RUB", 140.0, 166.0, &today),
        ])
    }

    fn fallback_on_error(&self) -> Option<Vec<ExchangeRate>> {
        let today = today_iso();
        Some(vec![
            ExchangeRate::new(BANK, "USD", 1_248_000.0, 1_262_000.0, &today),
            ExchangeRate::new(BANK, "EUR", 1_410_000.0, 1_470_000.0, &today),
            ExchangeRate::new(BANK, "RUB", 14_000.0, 16_600.0, &today),
        ])
    }
}

impl TengeBank {
    /// First personal table is the current day; older tables follow.
    fn select_rates(body: &TablesResponse) -> Vec<ExchangeRate> {
        let Some(latest) = body.personal.first() else {
            return Vec::new();
        };

        let mut rates = Vec::new();
        for currency in MAJOR_CURRENCIES {
            if let Some(quote) = latest.currency.get(currency) {
                if quote.buy > 0.0 && quote.sell > 0.0 {
                    rates.push(ExchangeRate::new(
                        BANK,
                        currency,
                        quote.buy,
                        quote.sell,
                        &latest.date,
                    ));
                }
            }
        }
        rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, f64, f64)]) -> TablesResponse {
        let mut currency = HashMap::new();
        for (code, buy, sell) in pairs {
            currency.insert(
                code.to_string(),
                BuySell {
                    buy: *buy,
                    sell: *sell,
                },
            );
        }
        TablesResponse {
            personal: vec![PersonalTable {
                date: "2024-01-15".to_string(),
                currency,
            }],
        }
    }

    #[test]
    fn test_selects_major_currencies_in_order() {
        let body = table(&[
            ("RUB", 140.0, 166.0),
            ("USD", 12480.0, 12620.0),
            ("KZT", 27.0, 29.0),
        ]);
        let rates = TengeBank::select_rates(&body);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].currency, "USD");
        assert_eq!(rates[1].currency, "RUB");
    }

    #[test]
    fn test_zero_quotes_are_skipped() {
        let body = table(&[("USD", 0.0, 12620.0), ("EUR", 14100.0, 14700.0)]);
        let rates = TengeBank::select_rates(&body);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].currency, "EUR");
    }

    #[test]
    fn test_no_tables_yields_nothing() {
        let body = TablesResponse { personal: vec![] };
        assert!(TengeBank::select_rates(&body).is_empty());
    }

    #[test]
    fn test_fallback_tiers_differ() {
        let empty = TengeBank.fallback_on_empty().unwrap();
        let error = TengeBank.fallback_on_error().unwrap();
        assert_eq!(empty[0].buy, 12480.0);
        assert_eq!(error[0].buy, 1_248_000.0);
    }
}
