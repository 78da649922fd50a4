//! Reshapes an Open-Meteo daily response into a [`ForecastTable`].
//!
//! The API answers a single-coordinate query with one object and a
//! multi-coordinate query with an array of objects, one per coordinate in
//! request order. Both shapes end up as one row per date per location.

use crate::localities::locality_index::LocalityIndex;
use crate::response::api_status::{body_reason, status_reason};
use crate::response::error::ResponseError;
use crate::response::raw_response::RawResponse;
use crate::types::coordinate::{CoordinateList, CoordinatePair};
use crate::types::forecast_mode::ForecastMode;
use crate::types::forecast_table::{ForecastRow, ForecastTable, LocationWarning};
use crate::types::variable::{DailyVariable, VariableSelection};
use crate::utils::parse_api_date;
use crate::ForecastError;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawForecastResponse {
    Multi(Vec<Value>),
    Single(LocationPayload),
}

#[derive(Debug, Deserialize)]
struct LocationPayload {
    #[serde(default)]
    daily: Option<DailyPayload>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyPayload {
    #[serde(default)]
    time: Option<Vec<String>>,
    #[serde(flatten)]
    series: HashMap<String, Value>,
}

/// Why one location could not be turned into rows.
#[derive(Debug)]
enum LocationIssue {
    Undecodable(String),
    ApiError(String),
    MissingEntry,
    MissingDaily,
    MissingTime,
    EmptyTime,
    BadDate(String),
}

impl fmt::Display for LocationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationIssue::Undecodable(e) => write!(f, "undecodable entry ({e})"),
            LocationIssue::ApiError(reason) => write!(f, "API error: {reason}"),
            LocationIssue::MissingEntry => f.write_str("no entry in response"),
            LocationIssue::MissingDaily => f.write_str("no daily data"),
            LocationIssue::MissingTime => f.write_str("no daily time axis"),
            LocationIssue::EmptyTime => f.write_str("empty daily time axis"),
            LocationIssue::BadDate(value) => write!(f, "unparsable date '{value}'"),
        }
    }
}

/// Validates a raw API response and flattens it into a table.
///
/// # Arguments
///
/// * `raw` - Status code and body as received.
/// * `coordinates` - The coordinate list the query was built from. Entry *i*
///   of a multi-location response belongs to coordinate *i*.
/// * `index` - Locality names, looked up with the exact coordinate tokens.
/// * `mode` - Decides which payload keys hold each variable.
/// * `variables` - One value column per selected variable.
///
/// # Returns
///
/// A table grouped by coordinate in request order, dates ascending inside each
/// group. For a multi-location response, locations without usable daily data
/// (including an empty time axis) are skipped and reported in
/// [`ForecastTable::warnings`]. A single object answering several coordinates
/// fills the first one; every other coordinate gets a warning.
///
/// # Errors
///
/// * [`ResponseError::ApiError`] for a non-success status, or an API error body.
/// * [`ResponseError::MalformedResponse`] for a body that is not a forecast,
///   or an unparsable date in a single-location response.
/// * [`ResponseError::MissingDailyData`] for a single-location response
///   without `daily` or `daily.time`.
/// * [`ResponseError::NoValidData`] for a single-location response with an
///   empty `daily.time`.
/// * [`ResponseError::NoValidData`] if no row at all could be produced.
pub fn normalize_response(
    raw: &RawResponse,
    coordinates: &CoordinateList,
    index: &LocalityIndex,
    mode: ForecastMode,
    variables: VariableSelection,
) -> Result<ForecastTable, ForecastError> {
    if !raw.is_success() {
        let reason = body_reason(&raw.body).unwrap_or_else(|| status_reason(raw.status));
        warn!("API returned status {}: {}", raw.status, reason);
        return Err(ResponseError::ApiError {
            code: raw.status,
            reason,
        }
        .into());
    }

    let parsed: RawForecastResponse = serde_json::from_slice(&raw.body)
        .map_err(|e| ResponseError::MalformedResponse(e.to_string()))?;

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    match parsed {
        RawForecastResponse::Single(payload) => {
            let pair = coordinates
                .get(0)
                .ok_or(ForecastError::NoCoordinatesProvided)?;
            let locality = index.lookup(&pair);
            let location = payload_daily(payload, raw.status)
                .and_then(|daily| location_rows(&daily, &pair, locality, mode, variables))
                .map_err(|issue| single_location_error(issue, raw.status))?;
            rows.extend(location);

            // One object answers one coordinate; the rest got nothing back.
            for (position, pair) in coordinates.pairs().enumerate().skip(1) {
                skip_location(&mut warnings, position, pair, index, LocationIssue::MissingEntry);
            }
        }
        RawForecastResponse::Multi(entries) => {
            if entries.len() > coordinates.len() {
                debug!(
                    "Ignoring {} response entries beyond the {} requested coordinates",
                    entries.len() - coordinates.len(),
                    coordinates.len()
                );
            }
            let mut entries = entries.into_iter();
            for (position, pair) in coordinates.pairs().enumerate() {
                let locality = index.lookup(&pair);
                let location = entries
                    .next()
                    .ok_or(LocationIssue::MissingEntry)
                    .and_then(|entry| {
                        serde_json::from_value::<LocationPayload>(entry)
                            .map_err(|e| LocationIssue::Undecodable(e.to_string()))
                    })
                    .and_then(|payload| payload_daily(payload, raw.status))
                    .and_then(|daily| location_rows(&daily, &pair, locality, mode, variables));

                match location {
                    Ok(location) => rows.extend(location),
                    Err(issue) => skip_location(&mut warnings, position, pair, index, issue),
                }
            }
        }
    }

    if rows.is_empty() {
        return Err(ResponseError::NoValidData.into());
    }
    info!(
        "Normalized {} rows for {} location(s), {} skipped",
        rows.len(),
        coordinates.len() - warnings.len(),
        warnings.len()
    );
    Ok(ForecastTable::from_rows(&rows, variables, warnings)?)
}

fn skip_location(
    warnings: &mut Vec<LocationWarning>,
    position: usize,
    pair: CoordinatePair,
    index: &LocalityIndex,
    issue: LocationIssue,
) {
    warn!(
        "Skipping location #{position} ({pair}, {}): {issue}",
        index.lookup(&pair)
    );
    warnings.push(LocationWarning {
        index: position,
        coordinate: pair,
        reason: issue.to_string(),
    });
}

fn payload_daily(payload: LocationPayload, status: u16) -> Result<DailyPayload, LocationIssue> {
    if payload.error {
        let reason = payload.reason.unwrap_or_else(|| status_reason(status));
        return Err(LocationIssue::ApiError(reason));
    }
    payload.daily.ok_or(LocationIssue::MissingDaily)
}

fn single_location_error(issue: LocationIssue, status: u16) -> ResponseError {
    match issue {
        LocationIssue::ApiError(reason) => ResponseError::ApiError {
            code: status,
            reason,
        },
        LocationIssue::MissingEntry | LocationIssue::MissingDaily | LocationIssue::MissingTime => {
            ResponseError::MissingDailyData
        }
        LocationIssue::EmptyTime => ResponseError::NoValidData,
        LocationIssue::BadDate(_) | LocationIssue::Undecodable(_) => {
            ResponseError::MalformedResponse(issue.to_string())
        }
    }
}

fn location_rows(
    daily: &DailyPayload,
    pair: &CoordinatePair,
    locality: &str,
    mode: ForecastMode,
    variables: VariableSelection,
) -> Result<Vec<ForecastRow>, LocationIssue> {
    let times = daily.time.as_ref().ok_or(LocationIssue::MissingTime)?;
    if times.is_empty() {
        return Err(LocationIssue::EmptyTime);
    }
    let dates = times
        .iter()
        .map(|value| parse_api_date(value).ok_or_else(|| LocationIssue::BadDate(value.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    let series: Vec<(DailyVariable, Vec<Option<f64>>)> = variables
        .iter()
        .map(|variable| {
            (
                variable,
                resolve_series(&daily.series, variable, mode, dates.len()),
            )
        })
        .collect();

    let mut rows: Vec<ForecastRow> = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| ForecastRow {
            locality: locality.to_string(),
            date,
            latitude: pair.latitude.clone(),
            longitude: pair.longitude.clone(),
            values: series
                .iter()
                .map(|(variable, values)| (*variable, values[i]))
                .collect(),
            forecast_mode: None,
            mode_detail: None,
        })
        .collect();
    rows.sort_by_key(|row| row.date);
    Ok(rows)
}

/// Values of `variable` aligned to a time axis of length `len`.
///
/// Tries the keys of [`DailyVariable::keys`] in order. Short arrays are padded
/// with `None`, long ones truncated, and anything that is not a number is `None`.
fn resolve_series(
    series: &HashMap<String, Value>,
    variable: DailyVariable,
    mode: ForecastMode,
    len: usize,
) -> Vec<Option<f64>> {
    let values = variable
        .keys(mode)
        .iter()
        .find_map(|key| series.get(key).and_then(Value::as_array));

    match values {
        Some(values) => (0..len)
            .map(|i| values.get(i).and_then(Value::as_f64))
            .collect(),
        None => {
            debug!("No values for {variable} in {mode} response");
            vec![None; len]
        }
    }
}
