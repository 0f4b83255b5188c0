/// Currencies the aggregator tracks, in display order.
pub const MAJOR_CURRENCIES: [&str; 3] = ["USD", "EUR", "RUB"];

/// User-Agent sent to bank JSON APIs.
pub const API_USER_AGENT: &str = "TelegramBot/1.0";

/// Browser-like User-Agent for bank websites that block obvious bots.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
