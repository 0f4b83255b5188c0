use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::constants::MAJOR_CURRENCIES;
use crate::errors::{BotError, Result};
use crate::rates::parse::parse_grouped;
use crate::rates::source::{get_html, RateSource};
use crate::rates::types::{today_iso, ExchangeRate};

const URL: &str = "https://davrbank.uz/en";
pub const BANK: &str = "Davr Bank";

/// Davr Bank homepage scraper.
///
/// Each table row carries the currency code followed by three value cells:
/// central-bank reference (ignored), then SELL, then BUY. The sell-before-buy
/// column order is what the site actually renders; do not "fix" it.
/// Values are per 1 unit and get multiplied by 100.
pub struct DavrBank;

#[async_trait]
impl RateSource for DavrBank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let response = get_html(client, URL).await?;
        if !response.status().is_success() {
            return Err(BotError::bank_api(format!(
                "Davr Bank website error: {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let rates = Self::parse(&html)?;
        debug!("Davr Bank rates fetched: {}", rates.len());
        Ok(rates)
    }
}

impl DavrBank {
    pub fn parse(html: &str) -> Result<Vec<ExchangeRate>> {
        // The "typograhpy" typo is the site's own class name.
        let row_re = Regex::new(
            r#"(?s)<span class="typograhpy-headline">([A-Z]{3})</span>.*?<td class="typography-headline-semibold pb-4 text-right">([^<]+)</td>.*?<td class="typography-headline-semibold pb-4 text-right">([^<]+)</td>.*?<td class="typography-headline-semibold pb-4 text-right">([^<]+)</td>"#,
        )
        .map_err(|e| BotError::parse(format!("Davr Bank row pattern: {}", e)))?;

        let today = today_iso();
        let mut rates = Vec::new();

        for caps in row_re.captures_iter(html) {
            let code = caps[1].trim().to_string();
            // caps[2] is the central-bank reference rate, unused.
            let sell_text = caps[3].trim().to_string();
            let buy_text = caps[4].trim().to_string();

            if !MAJOR_CURRENCIES.contains(&code.as_str()) {
                continue;
            }

            let (Some(sell), Some(buy)) = (parse_grouped(&sell_text), parse_grouped(&buy_text))
            else {
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

    fn row(code: &str, cb: &str, sell: &str, buy: &str) -> String {
        format!(
            r#"<tr><span class="typograhpy-headline">{code}</span>
               <td class="typography-headline-semibold pb-4 text-right">{cb}</td>
               <td class="typography-headline-semibold pb-4 text-right">{sell}</td>
               <td class="typography-headline-semibold pb-4 text-right">{buy}</td></tr>"#
        )
    }

    #[test]
    fn test_parse_sell_before_buy_order() {
        let html = row("USD", "12,510.00", "12,650.00", "12,500.00");
        let rates = DavrBank::parse(&html).unwrap();
        assert_eq!(rates.len(), 1);
        // Second value cell is SELL, third is BUY.
        assert_eq!(rates[0].sell, 1_265_000.0);
        assert_eq!(rates[0].buy, 1_250_000.0);
    }

    #[test]
    fn test_per_100_normalization() {
        let html = row("EUR", "13,600.00", "13,700.00", "13,500.00");
        let rates = DavrBank::parse(&html).unwrap();
        assert_eq!(rates[0].buy, 1_350_000.0);
        assert_eq!(rates[0].sell, 1_370_000.0);
    }

    #[test]
    fn test_skips_unknown_currency_and_bad_numbers() {
        let html = format!(
            "{}{}",
            row("GBP", "1", "2", "3"),
            row("USD", "12,510.00", "n/a", "12,500.00")
        );
        assert!(DavrBank::parse(&html).unwrap().is_empty());
    }

    #[test]
    fn test_empty_body() {
        assert!(DavrBank::parse("").unwrap().is_empty());
    }
}
