use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, warn};

use crate::constants::{API_USER_AGENT, BROWSER_USER_AGENT};
use crate::errors::Result;
use crate::rates::types::ExchangeRate;

/// One bank's rate feed.
///
/// Every bank hides the same job behind different plumbing: issue one HTTP
/// GET (or a few), dig the buy/sell numbers out of JSON or raw HTML, and
/// normalize to UZS per 100 units. Implementations keep their site-specific
/// parsing in inherent `parse_*` functions so it stays testable offline;
/// the trait only cares about the fetch contract.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Bank name as shown to users and stored on each record.
    fn bank(&self) -> &'static str;

    /// Fetch and parse this bank's current rates. May fail; `fetch` below
    /// is the error-containing wrapper the aggregator and routes use.
    async fn fetch_rates(&self, client: &Client) -> Result<Vec<ExchangeRate>>;

    /// Hardcoded rates used when the fetch succeeded but produced nothing.
    /// Only Universal Bank and Tenge Bank ship these; whether the other
    /// banks should too has never been decided, so the default stays None.
    fn fallback_on_empty(&self) -> Option<Vec<ExchangeRate>> {
        None
    }

    /// Hardcoded rates used when the fetch itself failed.
    fn fallback_on_error(&self) -> Option<Vec<ExchangeRate>> {
        None
    }

    /// Infallible fetch: network and parse failures are swallowed and the
    /// source simply contributes no records (or its fallback constants).
    async fn fetch(&self, client: &Client) -> Vec<ExchangeRate> {
        match self.fetch_rates(client).await {
            Ok(rates) if !rates.is_empty() => rates,
            Ok(_) => {
                warn!("{}: no rates parsed", self.bank());
                self.fallback_on_empty().unwrap_or_default()
            }
            Err(e) => {
                error!("{}: fetch failed: {}", self.bank(), e);
                self.fallback_on_error().unwrap_or_default()
            }
        }
    }
}

/// GET a bank JSON API with the plain bot User-Agent.
pub(crate) async fn get_json(client: &Client, url: &str) -> Result<reqwest::Response> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .header("User-Agent", API_USER_AGENT)
        .send()
        .await?;
    Ok(response)
}

/// GET a bank web page with browser-like headers; some sites serve bots a
/// stripped page without them.
pub(crate) async fn get_html(client: &Client, url: &str) -> Result<reqwest::Response> {
    let response = client
        .get(url)
        .header("User-Agent", BROWSER_USER_AGENT)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.5")
        .header("Connection", "keep-alive")
        .header("Upgrade-Insecure-Requests", "1")
        .send()
        .await?;
    Ok(response)
}
