use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::constants::MAJOR_CURRENCIES;
use crate::errors::{BotError, Result};
use crate::rates::parse::parse_comma_decimal;
use crate::rates::source::{get_html, RateSource};
use crate::rates::types::{today_iso, ExchangeRate};

const URL: &str = "https://nbu.uz/en/for-individuals-exchange-rates";
pub const BANK: &str = "NBU";

/// National Bank of Uzbekistan individuals page scraper.
///
/// Rates live in `currency_03_currency-item` blocks: a code div (the site
/// spells the class "curerncies") followed by two price divs, buy then
/// sell. Comma-decimal numbers, per 1 unit, multiplied by 100. Overlapping
/// blocks can repeat a currency; the first occurrence wins.
pub struct Nbu;

#[async_trait]
impl RateSource for Nbu {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let response = get_html(client, URL).await?;
        if !response.status().is_success() {
            return Err(BotError::bank_api(format!(
                "NBU website error: {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let rates = Self::parse(&html)?;
        debug!("NBU rates fetched: {} unique", rates.len());
        Ok(rates)
    }
}

impl Nbu {
    pub fn parse(html: &str) -> Result<Vec<ExchangeRate>> {
        let item_re = Regex::new(
            r#"(?s)<div class="currency_03_currency-item">.*?<div class="currency_03_currency-item-curerncies">([A-Z]{3})</div>.*?<div class="currency_03_currency-item-price">([^<]+)</div>.*?<div class="currency_03_currency-item-price">([^<]+)</div>"#,
        )
        .map_err(|e| BotError::parse(format!("NBU item pattern: {}", e)))?;

        let today = today_iso();
        let mut rates: Vec<ExchangeRate> = Vec::new();

        for caps in item_re.captures_iter(html) {
            let code = caps[1].trim().to_string();
            let buy_text = caps[2].trim().to_string();
            let sell_text = caps[3].trim().to_string();

            if !MAJOR_CURRENCIES.contains(&code.as_str()) {
                continue;
            }
            if rates.iter().any(|r| r.currency == code) {
                continue;
            }

            let (Some(buy), Some(sell)) = (
                parse_comma_decimal(&buy_text),
                parse_comma_decimal(&sell_text),
            ) else {
                continue;
            };

            rates.push(ExchangeRate::new(
                BANK,
                &code,
                buy * 100.0,
                sell * 100.0,
                &today,
            ));
        }

        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, buy: &str, sell: &str) -> String {
        format!(
            r#"<div class="currency_03_currency-item">
                 <div class="currency_03_currency-item-curerncies">{code}</div>
                 <div class="currency_03_currency-item-price">{buy}</div>
                 <div class="currency_03_currency-item-price">{sell}</div>
               </div>"#
        )
    }

    #[test]
    fn test_parse_items() {
        let html = format!(
            "{}{}",
            item("USD", "12 480,00", "12 620,00"),
            item("EUR", "13 500,50", "13 800,00")
        );
        let rates = Nbu::parse(&html).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].buy, 1_248_000.0);
        assert_eq!(rates[0].sell, 1_262_000.0);
        assert_eq!(rates[1].buy, 1_350_050.0);
    }

    #[test]
    fn test_duplicate_currency_keeps_first() {
        let html = format!(
            "{}{}",
            item("USD", "12 480,00", "12 620,00"),
            item("USD", "11 111,00", "11 222,00")
        );
        let rates = Nbu::parse(&html).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].buy, 1_248_000.0);
    }

    #[test]
    fn test_malformed_body() {
        assert!(Nbu::parse("").unwrap().is_empty());
        assert!(Nbu::parse("<div>not a rates page</div>").unwrap().is_empty());
        let bad = item("USD", "—", "12 620,00");
        assert!(Nbu::parse(&bad).unwrap().is_empty());
    }
}
