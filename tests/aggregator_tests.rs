use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use somkurs_bot::errors::{BotError, Result};
use somkurs_bot::rates::aggregator::fetch_from;
use somkurs_bot::rates::source::RateSource;
use somkurs_bot::rates::types::ExchangeRate;
use somkurs_bot::rates::{best_rates, format_rates_table};

/// Source that always yields a fixed rate list without touching the network.
struct StaticSource {
    bank: &'static str,
    rates: Vec<ExchangeRate>,
}

#[async_trait]
impl RateSource for StaticSource {
    fn bank(&self) -> &'static str {
        self.bank
    }

    async fn fetch_rates(&self, _client: &Client) -> Result<Vec<ExchangeRate>> {
        Ok(self.rates.clone())
    }
}

/// Source whose fetch always fails, simulating a dead bank API.
struct FailingSource;

#[async_trait]
impl RateSource for FailingSource {
    fn bank(&self) -> &'static str {
        "Broken Bank"
    }

    async fn fetch_rates(&self, _client: &Client) -> Result<Vec<ExchangeRate>> {
        Err(BotError::bank_api("connection refused"))
    }
}

/// Failing source that ships hardcoded fallback rates.
struct FallbackSource;

#[async_trait]
impl RateSource for FallbackSource {
    fn bank(&self) -> &'static str {
        "Fallback Bank"
    }

    async fn fetch_rates(&self, _client: &Client) -> Result<Vec<ExchangeRate>> {
        Err(BotError::bank_api("timed out"))
    }

    fn fallback_on_error(&self) -> Option<Vec<ExchangeRate>> {
        Some(vec![ExchangeRate::new(
            "Fallback Bank",
            "USD",
            12450.0,
            12650.0,
            "2024-01-01",
        )])
    }
}

/// Source that fetches fine but parses nothing, with both fallback tiers
/// present; the tier constants make the chosen tier observable.
struct EmptyResultSource;

#[async_trait]
impl RateSource for EmptyResultSource {
    fn bank(&self) -> &'static str {
        "Quiet Bank"
    }

    async fn fetch_rates(&self, _client: &Client) -> Result<Vec<ExchangeRate>> {
        Ok(Vec::new())
    }

    fn fallback_on_empty(&self) -> Option<Vec<ExchangeRate>> {
        Some(vec![usd("Quiet Bank", 12480.0, 12620.0)])
    }

    fn fallback_on_error(&self) -> Option<Vec<ExchangeRate>> {
        Some(vec![usd("Quiet Bank", 1_248_000.0, 1_262_000.0)])
    }
}

/// Source whose fetch fails outright, with both fallback tiers present.
struct ErrorTieredSource;

#[async_trait]
impl RateSource for ErrorTieredSource {
    fn bank(&self) -> &'static str {
        "Dead Bank"
    }

    async fn fetch_rates(&self, _client: &Client) -> Result<Vec<ExchangeRate>> {
        Err(BotError::bank_api("connection reset"))
    }

    fn fallback_on_empty(&self) -> Option<Vec<ExchangeRate>> {
        Some(vec![usd("Dead Bank", 12480.0, 12620.0)])
    }

    fn fallback_on_error(&self) -> Option<Vec<ExchangeRate>> {
        Some(vec![usd("Dead Bank", 1_248_000.0, 1_262_000.0)])
    }
}

fn usd(bank: &str, buy: f64, sell: f64) -> ExchangeRate {
    ExchangeRate::new(bank, "USD", buy, sell, "2024-01-01")
}

#[tokio::test]
async fn partial_failure_keeps_successful_sources() {
    let sources: Vec<Arc<dyn RateSource>> = vec![
        Arc::new(StaticSource {
            bank: "A",
            rates: vec![usd("A", 12500.0, 12650.0)],
        }),
        Arc::new(FailingSource),
        Arc::new(StaticSource {
            bank: "B",
            rates: vec![usd("B", 12480.0, 12620.0)],
        }),
    ];

    let rates = fetch_from(&Client::new(), &sources).await;
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].bank, "A");
    assert_eq!(rates[1].bank, "B");
}

#[tokio::test]
async fn one_good_one_failing_yields_exactly_the_good_records() {
    let sources: Vec<Arc<dyn RateSource>> = vec![
        Arc::new(StaticSource {
            bank: "X",
            rates: vec![usd("X", 12500.0, 12650.0)],
        }),
        Arc::new(FailingSource),
    ];

    let rates = fetch_from(&Client::new(), &sources).await;
    assert_eq!(
        rates,
        vec![ExchangeRate::new(
            "X", "USD", 12500.0, 12650.0, "2024-01-01"
        )]
    );
}

#[tokio::test]
async fn all_failing_yields_empty_not_error() {
    let sources: Vec<Arc<dyn RateSource>> =
        vec![Arc::new(FailingSource), Arc::new(FailingSource)];

    let rates = fetch_from(&Client::new(), &sources).await;
    assert!(rates.is_empty());
}

#[tokio::test]
async fn failed_source_with_fallback_contributes_its_constants() {
    let sources: Vec<Arc<dyn RateSource>> = vec![
        Arc::new(FailingSource),
        Arc::new(FallbackSource),
    ];

    let rates = fetch_from(&Client::new(), &sources).await;
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].bank, "Fallback Bank");
    assert_eq!(rates[0].buy, 12450.0);
}

#[tokio::test]
async fn empty_fetch_takes_the_empty_tier_fallback() {
    // An empty parse (including a logged-and-swallowed bad HTTP status)
    // must land on the per-100 constants, never the x100 error tier.
    let rates = EmptyResultSource.fetch(&Client::new()).await;
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].buy, 12480.0);
    assert_eq!(rates[0].sell, 12620.0);
}

#[tokio::test]
async fn failed_fetch_takes_the_error_tier_fallback() {
    let rates = ErrorTieredSource.fetch(&Client::new()).await;
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].buy, 1_248_000.0);
    assert_eq!(rates[0].sell, 1_262_000.0);
}

#[tokio::test]
async fn concatenation_preserves_fixed_source_order() {
    let sources: Vec<Arc<dyn RateSource>> = vec![
        Arc::new(StaticSource {
            bank: "First",
            rates: vec![usd("First", 1.0, 2.0), usd("First", 3.0, 4.0)],
        }),
        Arc::new(StaticSource {
            bank: "Second",
            rates: vec![usd("Second", 5.0, 6.0)],
        }),
    ];

    let rates = fetch_from(&Client::new(), &sources).await;
    let banks: Vec<&str> = rates.iter().map(|r| r.bank.as_str()).collect();
    assert_eq!(banks, vec!["First", "First", "Second"]);
}

#[tokio::test]
async fn aggregated_rates_flow_into_formatters() {
    let sources: Vec<Arc<dyn RateSource>> = vec![
        Arc::new(StaticSource {
            bank: "Hamkorbank",
            rates: vec![usd("Hamkorbank", 12500.0, 12650.0)],
        }),
        Arc::new(FailingSource),
    ];

    let rates = fetch_from(&Client::new(), &sources).await;

    let table = format_rates_table(&rates);
    assert!(table.contains("🏦 Hamkorbank"));
    assert!(table.contains("12,500.00 UZS per 100 USD"));

    let summary = best_rates(&rates);
    assert!(summary.contains("Best Buy: 12,500.00 UZS per 100 USD"));
}
