use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::errors::{BotError, Result};
use crate::rates::parse::parse_grouped;
use crate::rates::source::{get_html, RateSource};
use crate::rates::types::{today_iso, ExchangeRate};

const URL: &str = "https://www.infinbank.com/en/private/exchange-rates/";
pub const BANK: &str = "InfinBank";

/// InfinBank exchange-rates page scraper.
///
/// The exchange-office table lays currencies out as columns
/// (USD, EUR, GBP, RUB, JPY, CHF) with one Buy row and one Sell row. We
/// capture columns 1, 2 and 4, skipping GBP. Values are per 1 unit and get
/// multiplied by 100.
pub struct InfinBank;

#[async_trait]
impl RateSource for InfinBank {
    fn bank(&self) -> &'static str {
        BANK
    }

    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>> {
        let response = get_html(client, URL).await?;
        if !response.status().is_success() {
            return Err(BotError::bank_api(format!(
                "InfinBank website error: {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let rates = Self::parse(&html)?;
        debug!("InfinBank rates fetched: {}", rates.len());
        Ok(rates)
    }
}

impl InfinBank {
    pub fn parse(html: &str) -> Result<Vec<ExchangeRate>> {
        let buy_re = Regex::new(
            r#"(?s)<td class="pr--32">Buy</td>.*?<td>([^<]+)</td><td>([^<]+)</td><td>[^<]+</td><td>([^<]+)</td>"#,
        )
        .map_err(|e| BotError::parse(format!("InfinBank buy pattern: {}", e)))?;
        let sell_re = Regex::new(
            r#"(?s)<td class="pt-0 pr--32">Sell</td>.*?<td class="pt-0">([^<]+)</td><td class="pt-0">([^<]+)</td><td class="pt-0">[^<]+</td><td class="pt-0">([^<]+)</td>"#,
        )
        .map_err(|e| BotError::parse(format!("InfinBank sell pattern: {}", e)))?;

        let (Some(buy_caps), Some(sell_caps)) = (buy_re.captures(html), sell_re.captures(html))
        else {
            return Ok(Vec::new());
        };

        let today = today_iso();
        let mut rates = Vec::new();

        for (i, currency) in ["USD", "EUR", "RUB"].into_iter().enumerate() {
            let buy_text = buy_caps[i + 1].trim().to_string();
            let sell_text = sell_caps[i + 1].trim().to_string();

            let (Some(buy), Some(sell)) = (parse_grouped(&buy_text), parse_grouped(&sell_text))
            else {
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

    const PAGE: &str = r#"
        <table>
        <tr><td class="pr--32">Buy</td>
        <td>12 500</td><td>13 550</td><td>15 800</td><td>152</td><td>84</td><td>14 100</td></tr>
        <tr><td class="pt-0 pr--32">Sell</td>
        <td class="pt-0">12 650</td><td class="pt-0">13 750</td><td class="pt-0">16 100</td><td class="pt-0">160</td><td class="pt-0">86</td><td class="pt-0">14 400</td></tr>
        </table>"#;

    #[test]
    fn test_parse_skips_gbp_column() {
        let rates = InfinBank::parse(PAGE).unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0].currency, "USD");
        assert_eq!(rates[0].buy, 1_250_000.0);
        assert_eq!(rates[0].sell, 1_265_000.0);
        // Column 4, not the GBP column 3.
        assert_eq!(rates[2].currency, "RUB");
        assert_eq!(rates[2].buy, 15_200.0);
        assert_eq!(rates[2].sell, 16_000.0);
    }

    #[test]
    fn test_missing_rows_yield_nothing() {
        assert!(InfinBank::parse("<html></html>").unwrap().is_empty());
        // Buy row alone is not enough.
        let only_buy = r#"<td class="pr--32">Buy</td><td>1</td><td>2</td><td>3</td><td>4</td>"#;
        assert!(InfinBank::parse(only_buy).unwrap().is_empty());
    }
}
