//! HTTP API for the web UI.
//!
//! Two distinct surfaces, kept separate on purpose: `/api/rates` runs the
//! in-process aggregator over the JSON-API banks, while every HTML-scraped
//! bank gets its own route the UI hits on demand.

use axum::{extract::State, response::Json, routing::get, Router};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::errors::Result;
use crate::rates::fetch_all_rates;
use crate::rates::source::RateSource;
use crate::rates::sources::{AgroBank, Anorbank, DavrBank, InfinBank, KdbBank, Nbu};
use crate::rates::types::ExchangeRate;
use crate::utils::Config;

/// Shared state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client,
}

/// Wire response shape the UI expects from every rates endpoint.
#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub success: bool,
    pub rates: Vec<ExchangeRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RatesResponse {
    fn ok(rates: Vec<ExchangeRate>) -> Self {
        Self {
            success: true,
            rates,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            rates: Vec::new(),
            error: Some(error),
        }
    }
}

/// Rates API server.
pub struct RatesServer {
    config: Arc<Config>,
    state: AppState,
}

impl RatesServer {
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self {
            config,
            state: AppState { client },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/rates", get(all_rates))
            .route("/api/davrbank-rates", get(davrbank_rates))
            .route("/api/kdbbank-rates", get(kdbbank_rates))
            .route("/api/infinbank-rates", get(infinbank_rates))
            .route("/api/anorbank-rates", get(anorbank_rates))
            .route("/api/nbu-rates", get(nbu_rates))
            .route("/api/agrobank-rates", get(agrobank_rates))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    pub async fn run(&self) -> Result<()> {
        let addr = self.config.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::errors::BotError::internal(format!("bind {}: {}", addr, e)))?;

        info!("🌐 Rates API listening on http://{}", addr);

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::errors::BotError::internal(format!("server error: {}", e)))?;
        Ok(())
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "somkurs-bot",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Combined JSON-source aggregator endpoint. Never fails: sources that
/// errored simply contribute no records.
async fn all_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    let rates = fetch_all_rates(&state.client).await;
    Json(RatesResponse::ok(rates))
}

/// Invoke one scraped source and map its outcome to the wire shape. Empty
/// rates with `success: true` means the page parsed to nothing (the UI
/// shows "-"); `success: false` means the fetch itself failed.
async fn scrape(source: &dyn RateSource, state: &AppState) -> Json<RatesResponse> {
    match source.fetch_rates(&state.client).await {
        Ok(rates) => Json(RatesResponse::ok(rates)),
        Err(e) => {
            error!("{}: route fetch failed: {}", source.bank(), e);
            Json(RatesResponse::failed(e.to_string()))
        }
    }
}

async fn davrbank_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    scrape(&DavrBank, &state).await
}

async fn kdbbank_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    scrape(&KdbBank, &state).await
}

async fn infinbank_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    scrape(&InfinBank, &state).await
}

async fn anorbank_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    scrape(&Anorbank, &state).await
}

async fn nbu_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    scrape(&Nbu, &state).await
}

async fn agrobank_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    scrape(&AgroBank, &state).await
}
