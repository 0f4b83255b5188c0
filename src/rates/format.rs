//! Chat-facing renderings of the aggregated rate list. Output is Telegram
//! Markdown (single-asterisk bold).

use chrono::{FixedOffset, Utc};

use crate::constants::MAJOR_CURRENCIES;
use crate::rates::sources::{hamkorbank, tengebank, universalbank};
use crate::rates::types::ExchangeRate;
use crate::utils::{format_display_date, format_uzs};

/// Tashkent is UTC+5 year-round.
const TASHKENT_OFFSET_SECS: i32 = 5 * 3600;

/// Render the full comparison table: per currency, one block per known bank
/// when that bank has data.
pub fn format_rates_table(rates: &[ExchangeRate]) -> String {
    if rates.is_empty() {
        return "❌ Unable to fetch exchange rates at the moment. Please try again later."
            .to_string();
    }

    let mut table = String::from("💱 *Exchange Rates*\n\n");

    for currency in MAJOR_CURRENCIES {
        let currency_rates: Vec<&ExchangeRate> =
            rates.iter().filter(|r| r.currency == currency).collect();
        if currency_rates.is_empty() {
            continue;
        }

        table.push_str(&format!("*{}*\n", currency));

        for bank in [hamkorbank::BANK, universalbank::BANK, tengebank::BANK] {
            if let Some(rate) = currency_rates.iter().find(|r| r.bank == bank) {
                table.push_str(&format!("🏦 {}\n", rate.bank));
                table.push_str(&format!(
                    "   💰 Buy: {} UZS per 100 {}\n",
                    format_uzs(rate.buy),
                    rate.currency
                ));
                table.push_str(&format!(
                    "   💸 Sell: {} UZS per 100 {}\n",
                    format_uzs(rate.sell),
                    rate.currency
                ));
                table.push_str(&format!("   📅 {}\n\n", format_display_date(&rate.date)));
            }
        }
    }

    let tashkent = FixedOffset::east_opt(TASHKENT_OFFSET_SECS)
        .map(|offset| Utc::now().with_timezone(&offset).format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_default();
    table.push_str(&format!("🔄 *Last updated:* {}", tashkent));

    table
}

/// Per currency, the record with the highest buy and the record with the
/// lowest sell, selected independently; the two winners may be different
/// banks.
pub fn best_rates(rates: &[ExchangeRate]) -> String {
    if rates.is_empty() {
        return "❌ No rates available".to_string();
    }

    let mut summary = String::from("🏆 *Best Exchange Rates*\n\n");

    for currency in MAJOR_CURRENCIES {
        let currency_rates: Vec<&ExchangeRate> =
            rates.iter().filter(|r| r.currency == currency).collect();

        let (Some(best_buy), Some(best_sell)) = (
            currency_rates
                .iter()
                .copied()
                .reduce(|best, r| if r.buy > best.buy { r } else { best }),
            currency_rates
                .iter()
                .copied()
                .reduce(|best, r| if r.sell < best.sell { r } else { best }),
        ) else {
            continue;
        };

        summary.push_str(&format!("*{}*\n", currency));
        summary.push_str(&format!(
            "💰 Best Buy: {} UZS per 100 {}\n",
            format_uzs(best_buy.buy),
            currency
        ));
        summary.push_str(&format!(
            "💸 Best Sell: {} UZS per 100 {}\n\n",
            format_uzs(best_sell.sell),
            currency
        ));
    }

    summary
}
