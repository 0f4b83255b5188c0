use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::errors::{BotError, Result};
use crate::rates::source::{get_html, RateSource};
use crate::rates::types::{today_iso, ExchangeRate};

const URL: &str = "https://kdb.uz/en/interactive-services/exchange-rates";
pub const BANK: &str = "KDB Bank";

/// KDB Bank exchange-rates page scraper.
///
/// The "Exchange Office" tab holds one `<td>` per currency with both values
/// in a single cell, `12520 / 12640`, buy before sell. Cells appear in a
/// fixed USD, EUR, RUB order; RUB is frequently `n/a / n/a` and is then
/// skipped. Values are per 1 unit and get multiplied by 100.
pub struct KdbBank;

#[async_trait]
impl RateSource for KdbBank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let response = get_html(client, URL).await?;
        if !response.status().is_success() {
            return Err(BotError::bank_api(format!(
                "KDB Bank website error: {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let rates = Self::parse(&html)?;
        debug!("KDB Bank rates fetched: {}", rates.len());
        Ok(rates)
    }
}

impl KdbBank {
    pub fn parse(html: &str) -> Result<Vec<ExchangeRate>> {
        let section_re =
            Regex::new(r#"(?s)<div class="tab-pane fade show active" id="kdb"[^>]*>(.*?)</div>"#)
                .map_err(|e| BotError::parse(format!("KDB section pattern: {}", e)))?;
        let cell_re = Regex::new(r#"<td>\s*([^<]+?)\s*</td>"#)
            .map_err(|e| BotError::parse(format!("KDB cell pattern: {}", e)))?;
        let pair_re = Regex::new(r#"(\d+(?:\.\d+)?)\s*/\s*(\d+(?:\.\d+)?)"#)
            .map_err(|e| BotError::parse(format!("KDB pair pattern: {}", e)))?;

        let Some(section) = section_re.captures(html) else {
            return Ok(Vec::new());
        };

        let cells: Vec<String> = cell_re
            .captures_iter(&section[1])
            .map(|c| c[1].to_string())
            .collect();
        if cells.len() < 3 {
            return Ok(Vec::new());
        }

        let today = today_iso();
        let mut rates = Vec::new();

        for (cell, currency) in cells.iter().zip(["USD", "EUR", "RUB"]) {
            // "n/a / n/a" cells simply don't match the numeric pair.
            let Some(pair) = pair_re.captures(cell) else {
                continue;
            };
            let (Ok(buy), Ok(sell)) = (pair[1].parse::<f64>(), pair[2].parse::<f64>()) else {
                continue;
            };
            rates.push(ExchangeRate::new(
                BANK,
                currency,
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

    fn page(usd: &str, eur: &str, rub: &str) -> String {
        format!(
            r#"<div class="tab-pane fade show active" id="kdb" role="tabpanel">
               <table><tr><td> {usd} </td></tr><tr><td> {eur} </td></tr>
               <tr><td> {rub} </td></tr></table></div>"#
        )
    }

    #[test]
    fn test_parse_buy_slash_sell_pairs() {
        let html = page("12520 / 12640", "13550 / 13750", "152 / 160");
        let rates = KdbBank::parse(&html).unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0].currency, "USD");
        assert_eq!(rates[0].buy, 1_252_000.0);
        assert_eq!(rates[0].sell, 1_264_000.0);
        assert_eq!(rates[2].currency, "RUB");
        assert_eq!(rates[2].buy, 15_200.0);
    }

    #[test]
    fn test_na_rub_is_skipped() {
        let html = page("12520 / 12640", "13550 / 13750", "n/a / n/a");
        let rates = KdbBank::parse(&html).unwrap();
        assert_eq!(rates.len(), 2);
        assert!(rates.iter().all(|r| r.currency != "RUB"));
    }

    #[test]
    fn test_missing_section_or_cells() {
        assert!(KdbBank::parse("<html></html>").unwrap().is_empty());
        let short = r#"<div class="tab-pane fade show active" id="kdb"><td> 1 / 2 </td>"#;
        assert!(KdbBank::parse(short).unwrap().is_empty());
    }
}
