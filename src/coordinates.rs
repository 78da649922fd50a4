//! Parsing of the free-text coordinate list typed by the user.
//!
//! The accepted format is `lat,lon` pairs separated by a comma followed by a
//! space, e.g. `"3.848,11.5021, 4.0511,9.7679"`.

use crate::types::coordinate::{CoordinateList, CoordinatePair};
use crate::ForecastError;
use log::debug;

/// Separator between two pairs.
pub const PAIR_SEPARATOR: &str = ", ";

/// Parses a coordinate list into index-aligned latitude and longitude tokens.
///
/// Fragments are trimmed and empty fragments are ignored, so a trailing
/// separator is harmless. Each remaining fragment must contain exactly one
/// comma, and both tokens must be finite numbers within the valid latitude
/// (−90..=90) and longitude (−180..=180) ranges. Tokens are kept as text.
///
/// # Errors
///
/// * [`ForecastError::InvalidCoordinateFormat`] naming the first bad fragment.
/// * [`ForecastError::NoCoordinatesProvided`] if the text holds no pair at all.
///
/// # Examples
///
/// ```
/// use onacc_forecast::parse_coordinates;
///
/// let list = parse_coordinates("3.84,11.50, 4.05,9.76")?;
/// assert_eq!(list.latitudes(), ["3.84", "4.05"]);
/// assert_eq!(list.longitudes(), ["11.50", "9.76"]);
/// # Ok::<(), onacc_forecast::ForecastError>(())
/// ```
pub fn parse_coordinates(text: &str) -> Result<CoordinateList, ForecastError> {
    let mut list = CoordinateList::default();

    for fragment in text.split(PAIR_SEPARATOR).map(str::trim) {
        if fragment.is_empty() {
            continue;
        }
        list.push(parse_pair(fragment)?);
    }

    if list.is_empty() {
        return Err(ForecastError::NoCoordinatesProvided);
    }
    debug!("Parsed {} coordinate pair(s)", list.len());
    Ok(list)
}

/// Joins pairs back into the text form accepted by [`parse_coordinates`].
pub fn join_coordinates<'a>(pairs: impl IntoIterator<Item = &'a CoordinatePair>) -> String {
    pairs
        .into_iter()
        .map(CoordinatePair::to_string)
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

fn parse_pair(fragment: &str) -> Result<CoordinatePair, ForecastError> {
    let invalid = || ForecastError::InvalidCoordinateFormat(fragment.to_string());

    let tokens: Vec<&str> = fragment.split(',').map(str::trim).collect();
    let [latitude, longitude] = tokens.as_slice() else {
        return Err(invalid());
    };

    if !in_range(latitude, 90.0) || !in_range(longitude, 180.0) {
        return Err(invalid());
    }
    Ok(CoordinatePair::new(latitude, longitude))
}

fn in_range(token: &str, limit: f64) -> bool {
    token
        .parse::<f64>()
        .map(|value| value.is_finite() && value.abs() <= limit)
        .unwrap_or(false)
}
