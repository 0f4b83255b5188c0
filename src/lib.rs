pub mod bot;
pub mod constants;
pub mod errors;
pub mod extract;
pub mod rates;
pub mod server;
pub mod utils;
