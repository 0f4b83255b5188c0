use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One bank's quote for one currency, normalized to UZS per 100 units.
///
/// `buy` is what the bank pays for foreign currency, `sell` is what it
/// charges. Nothing guarantees `buy <= sell`; some banks publish inverted
/// spreads and we pass them through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub bank: String,
    pub currency: String,
    pub buy: f64,
    pub sell: f64,
    pub date: String,
}

impl ExchangeRate {
    pub fn new(
        bank: impl Into<String>,
        currency: impl Into<String>,
        buy: f64,
        sell: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            bank: bank.into(),
            currency: currency.into(),
            buy,
            sell,
            date: date.into(),
        }
    }
}

/// Today's date as an ISO string, used by scrapers whose pages carry no date.
pub fn today_iso() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
