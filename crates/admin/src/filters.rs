//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Datelike, Utc};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(Utc::now().year())
}

/// Format a cent amount as dollars.
///
/// Usage in templates: `{{ rule.reward_amount|cents }}`
#[askama::filter_fn]
pub fn cents(value: &i64, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_cents(*value))
}

/// Format a unix-seconds timestamp as a UTC date-time string.
///
/// Usage in templates: `{{ account.lastlogin|unix_ts }}`
#[askama::filter_fn]
pub fn unix_ts(value: &i64, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_unix_ts(*value))
}

fn format_cents(value: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let dollars = value as f64 / 100.0;
    format!("${dollars:.2}")
}

fn format_unix_ts(value: i64) -> String {
    DateTime::<Utc>::from_timestamp(value, 0).map_or_else(
        || "-".to_owned(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::{format_cents, format_unix_ts};

    #[test]
    fn test_cents_formats_dollars() {
        assert_eq!(format_cents(1250), "$12.50");
        assert_eq!(format_cents(5), "$0.05");
    }

    #[test]
    fn test_unix_ts_formats_utc() {
        assert_eq!(format_unix_ts(0), "1970-01-01 00:00");
        assert_eq!(format_unix_ts(i64::MAX), "-");
    }
}
