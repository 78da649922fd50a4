use chrono::{Duration, NaiveDate};
use polars::prelude::Column;

pub(crate) fn get_opt_float(series: &Column, idx: usize) -> Option<f64> {
    series.f64().ok().and_then(|ca| ca.get(idx))
}

pub(crate) fn get_opt_str(series: &Column, idx: usize) -> Option<String> {
    series
        .str()
        .ok()
        .and_then(|ca| ca.get(idx))
        .map(str::to_string)
}

/// Converts a Polars `Date` value (days since the Unix epoch) back into a `NaiveDate`.
pub(crate) fn days_to_date(days: i32) -> Option<NaiveDate> {
    // `NaiveDate::default()` is 1970-01-01.
    NaiveDate::default().checked_add_signed(Duration::days(days as i64))
}

/// Parses an ISO `YYYY-MM-DD` date as returned in the `daily.time` array.
pub(crate) fn parse_api_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
