//! One adapter per bank. The JSON-API banks (Hamkorbank, Universal Bank,
//! Tenge Bank) feed the in-process aggregator; the scraped banks are wired
//! as individual HTTP routes and are never merged into it.

pub mod agrobank;
pub mod anorbank;
pub mod davrbank;
pub mod hamkorbank;
pub mod infinbank;
pub mod kdbbank;
pub mod nbu;
pub mod tengebank;
pub mod universalbank;

pub use agrobank::AgroBank;
pub use anorbank::Anorbank;
pub use davrbank::DavrBank;
pub use hamkorbank::Hamkorbank;
pub use infinbank::InfinBank;
pub use kdbbank::KdbBank;
pub use nbu::Nbu;
pub use tengebank::TengeBank;
pub use universalbank::UniversalBank;

use std::sync::Arc;

use crate::rates::source::RateSource;

/// The JSON-API sources the aggregator fans out to, in merge order.
pub fn json_sources() -> Vec<Arc<dyn RateSource>> {
    vec![
        Arc::new(Hamkorbank),
        Arc::new(UniversalBank),
        Arc::new(TengeBank),
    ]
}
