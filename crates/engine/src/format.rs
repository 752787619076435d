//! Display helpers shared by the views and the exports.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::MoneyCents;

const ISO_DATE: &str = "%Y-%m-%d";

/// Formats an amount with a currency symbol and exactly two decimals.
///
/// ```rust
/// use finance_engine::{MoneyCents, format_money};
///
/// assert_eq!(format_money(MoneyCents::new(10050), "$"), "$100.50");
/// assert_eq!(format_money(MoneyCents::new(-500), "$"), "$-5.00");
/// ```
pub fn format_money(amount: MoneyCents, symbol: &str) -> String {
    format!("{symbol}{amount}")
}

/// Normalizes a stored date to `YYYY-MM-DD`.
///
/// Empty input gives an empty string; input that can't be parsed is returned
/// unchanged.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_timestamp(raw) {
        Some(ts) => ts.date().format(ISO_DATE).to_string(),
        None => raw.to_string(),
    }
}

/// Parses the date formats an entry may carry.
///
/// Plain dates map to midnight; RFC 3339 timestamps are converted to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().date_naive().format(ISO_DATE).to_string()
}
