use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::errors::{BotError, Result};
use crate::rates::parse::parse_comma_decimal;
use crate::rates::source::{get_html, RateSource};
use crate::rates::types::{today_iso, ExchangeRate};

const URL: &str = "https://anorbank.uz/en/about/exchange-rates/";
pub const BANK: &str = "Anorbank";

/// Long-form currency labels as they appear in the first table column.
const CURRENCY_LABELS: [(&str, &str); 3] = [
    ("US Dollar, USD", "USD"),
    ("EURO, EUR", "EUR"),
    ("Russian Rouble, RUB", "RUB"),
];

/// Anorbank exchange-rates page scraper.
///
/// Rows are generic 4-cell `<tr>`s: label, buy, sell, central-bank rate.
/// Numbers use a comma DECIMAL marker. The row regex also matches unrelated
/// tables further down the page, so duplicates are dropped keeping the
/// first occurrence per currency. Values are per 1 unit, multiplied by 100.
pub struct Anorbank;

#[async_trait]
impl RateSource for Anorbank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let response = get_html(client, URL).await?;
        if !response.status().is_success() {
            return Err(BotError::bank_api(format!(
                "Anorbank website error: {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let rates = Self::parse(&html)?;
        debug!("Anorbank rates fetched: {} unique", rates.len());
        Ok(rates)
    }
}

impl Anorbank {
    pub fn parse(html: &str) -> Result<Vec<ExchangeRate>> {
        let row_re = Regex::new(
            r#"(?s)<tr[^>]*>\s*<td[^>]*>([^<]+)</td>\s*<td[^>]*>([^<]+)</td>\s*<td[^>]*>([^<]+)</td>\s*<td[^>]*>([^<]+)</td>"#,
        )
        .map_err(|e| BotError::parse(format!("Anorbank row pattern: {}", e)))?;

        let today = today_iso();
        let mut rates: Vec<ExchangeRate> = Vec::new();

        for caps in row_re.captures_iter(html) {
            let label = caps[1].trim().to_string();
            let buy_text = caps[2].trim().to_string();
            let sell_text = caps[3].trim().to_string();

            for (full_name, code) in CURRENCY_LABELS {
                if !label.contains(full_name) && !label.contains(code) {
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
                    code,
                    buy * 100.0,
                    sell * 100.0,
                    &today,
                ));
                break;
            }
        }

        // First occurrence per currency wins.
        let mut unique: Vec<ExchangeRate> = Vec::new();
        for rate in rates {
            if !unique.iter().any(|r| r.currency == rate.currency) {
                unique.push(rate);
            }
        }

        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, buy: &str, sell: &str) -> String {
        format!(
            "<tr class=\"rates\">\n<td>{label}</td>\n<td>{buy}</td>\n<td>{sell}</td>\n<td>12 510,00</td></tr>"
        )
    }

    #[test]
    fn test_comma_decimal_and_per_100() {
        let html = row("US Dollar, USD", "12 500,50", "12 650,00");
        let rates = Anorbank::parse(&html).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].currency, "USD");
        assert_eq!(rates[0].buy, 1_250_050.0);
        assert_eq!(rates[0].sell, 1_265_000.0);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let html = format!(
            "{}{}",
            row("US Dollar, USD", "12 500,00", "12 650,00"),
            row("US Dollar, USD", "11 111,00", "11 222,00")
        );
        let rates = Anorbank::parse(&html).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].buy, 1_250_000.0);
    }

    #[test]
    fn test_unrelated_rows_ignored() {
        let html = row("Gold bar, XAU", "1,00", "2,00");
        assert!(Anorbank::parse(&html).unwrap().is_empty());
        assert!(Anorbank::parse("").unwrap().is_empty());
    }
}
