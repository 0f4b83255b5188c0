mod config;
pub mod formatting;

pub use config::Config;
pub use formatting::{format_display_date, format_uzs};
