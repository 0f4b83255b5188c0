//! Numeric parsing for bank rate text.
//!
//! Bank sites disagree on number formatting: most group thousands with
//! spaces or commas and use a dot decimal, while Anorbank and NBU use a
//! comma as the decimal marker. Each scraper picks the helper matching its
//! site's convention; a row that still fails to parse is skipped.

/// Parse a number that may use spaces and/or commas as thousands
/// separators with a dot decimal: `"12 500.50"` / `"12,500.50"` -> 12500.5.
pub fn parse_grouped(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    cleaned.parse().ok()
}

/// Parse a number where the comma is the DECIMAL marker and spaces group
/// thousands: `"12 500,50"` -> 12500.5.
pub fn parse_comma_decimal(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse().ok()
}

/// Parse a number with space grouping only (the onmap.uz chart feed style).
pub fn parse_spaced(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.parse().ok()
}
