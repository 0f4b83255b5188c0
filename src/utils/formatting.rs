//! Display formatting for UZS amounts and dates.

use chrono::NaiveDate;

/// Format a UZS amount with thousand separators and two decimals,
/// e.g. `12500.0` -> `"12,500.00"`.
pub fn format_uzs(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();

    let total_cents = (amount * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}.{:02}", grouped, cents)
    } else {
        format!("{}.{:02}", grouped, cents)
    }
}

/// Render an ISO date (`2024-01-15`) as `1/15/2024`; timestamps keep just
/// their date part. Anything unparseable passes through unchanged.
pub fn format_display_date(date: &str) -> String {
    let date_part = date.split('T').next().unwrap_or(date);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => format!(
            "{}/{}/{}",
            d.format("%m").to_string().trim_start_matches('0'),
            d.format("%d").to_string().trim_start_matches('0'),
            d.format("%Y")
        ),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uzs_grouping() {
        assert_eq!(format_uzs(12500.0), "12,500.00");
        assert_eq!(format_uzs(1265000.0), "1,265,000.00");
        assert_eq!(format_uzs(150.0), "150.00");
        assert_eq!(format_uzs(0.0), "0.00");
    }

    #[test]
    fn test_format_uzs_decimals() {
        assert_eq!(format_uzs(12500.5), "12,500.50");
        assert_eq!(format_uzs(12650.258), "12,650.26");
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-01-15"), "1/15/2024");
        assert_eq!(format_display_date("2024-11-03T09:00:00Z"), "11/3/2024");
        assert_eq!(format_display_date("garbage"), "garbage");
    }
}
