pub mod commands;
pub mod handlers;
pub mod telegram;

pub use commands::Command;
pub use telegram::RatesBot;
