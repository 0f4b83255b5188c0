pub mod aggregator;
pub mod format;
pub mod parse;
pub mod source;
pub mod sources;
pub mod types;

pub use aggregator::fetch_all_rates;
pub use format::{best_rates, format_rates_table};
pub use source::RateSource;
pub use types::ExchangeRate;
