//! Coordinate values as they travel through a submission.
//!
//! Latitude and longitude are kept as the exact text tokens the user (or the
//! locality spreadsheet) supplied. They are only parsed to check that they are
//! valid numbers; the original text is what gets sent upstream and what is used
//! as the locality lookup key, so `"3.8480"` and `"3.848"` stay distinct.

use std::fmt;

/// A single `(latitude, longitude)` pair stored as trimmed decimal strings.
///
/// # Examples
///
/// ```
/// use onacc_forecast::CoordinatePair;
///
/// let yaounde = CoordinatePair::new("3.8480", "11.5021");
/// assert_eq!(yaounde.latitude, "3.8480");
/// assert_eq!(yaounde.to_string(), "3.8480,11.5021");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinatePair {
    /// Latitude token, e.g. `"3.8480"`.
    pub latitude: String,
    /// Longitude token, e.g. `"11.5021"`.
    pub longitude: String,
}

impl CoordinatePair {
    /// Creates a pair from two tokens. Surrounding whitespace is trimmed.
    pub fn new(latitude: impl AsRef<str>, longitude: impl AsRef<str>) -> Self {
        Self {
            latitude: latitude.as_ref().trim().to_string(),
            longitude: longitude.as_ref().trim().to_string(),
        }
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// The parsed coordinate list of one submission.
///
/// Latitudes and longitudes are held in two index-aligned sequences, which is
/// the shape the upstream API expects (`latitude=a,b&longitude=c,d`). The list
/// is never empty once produced by [`crate::parse_coordinates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateList {
    latitudes: Vec<String>,
    longitudes: Vec<String>,
}

impl CoordinateList {
    pub(crate) fn push(&mut self, pair: CoordinatePair) {
        self.latitudes.push(pair.latitude);
        self.longitudes.push(pair.longitude);
    }

    /// Latitude tokens in request order.
    pub fn latitudes(&self) -> &[String] {
        &self.latitudes
    }

    /// Longitude tokens in request order.
    pub fn longitudes(&self) -> &[String] {
        &self.longitudes
    }

    /// Number of coordinate pairs.
    pub fn len(&self) -> usize {
        self.latitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latitudes.is_empty()
    }

    /// Returns the pair at `index`, if any.
    pub fn get(&self, index: usize) -> Option<CoordinatePair> {
        Some(CoordinatePair {
            latitude: self.latitudes.get(index)?.clone(),
            longitude: self.longitudes.get(index)?.clone(),
        })
    }

    /// Iterates over the pairs in request order.
    pub fn pairs(&self) -> impl Iterator<Item = CoordinatePair> + '_ {
        self.latitudes
            .iter()
            .zip(&self.longitudes)
            .map(|(lat, lon)| CoordinatePair {
                latitude: lat.clone(),
                longitude: lon.clone(),
            })
    }
}

impl FromIterator<CoordinatePair> for CoordinateList {
    fn from_iter<I: IntoIterator<Item = CoordinatePair>>(iter: I) -> Self {
        let mut list = CoordinateList::default();
        for pair in iter {
            list.push(pair);
        }
        list
    }
}
