//! Display formatting for prices and dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format a price as a dollar string with two decimals.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Format an ISO publish date as `M/D/YYYY`.
///
/// Accepts RFC 3339 timestamps, naive timestamps and plain dates. Anything
/// else is returned unchanged.
pub fn format_publish_date(raw: &str) -> String {
    let trimmed = raw.trim();

    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
