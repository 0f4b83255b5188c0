//! Fan-out/fan-in over the JSON-API bank sources.
//!
//! The HTML-scraped banks are deliberately NOT merged here; each of those is
//! its own HTTP route the UI calls on demand. This module only covers the
//! three JSON feeds the bot and the combined endpoint use.

use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::rates::source::RateSource;
use crate::rates::sources::json_sources;
use crate::rates::types::ExchangeRate;

/// Fetch all JSON sources concurrently and concatenate whatever succeeded,
/// in fixed source order. A failed source contributes zero records; this
/// function itself never fails.
pub async fn fetch_all_rates(client: &Client) -> Vec<ExchangeRate> {
    fetch_from(client, &json_sources()).await
}

/// Same fan-out over an explicit source list.
pub async fn fetch_from(client: &Client, sources: &[Arc<dyn RateSource>]) -> Vec<ExchangeRate> {
    info!("Fetching exchange rates from {} banks", sources.len());

    let fetches = sources.iter().map(|source| source.fetch(client));
    let results = join_all(fetches).await;

    let all_rates: Vec<ExchangeRate> = results.into_iter().flatten().collect();
    info!("Fetched {} rates from all banks", all_rates.len());
    all_rates
}
