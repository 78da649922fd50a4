//! Import of the locality spreadsheet and the filter/selection steps that turn
//! it into a coordinate list.

use crate::coordinates::join_coordinates;
use crate::localities::error::LocalityError;
use crate::localities::locality_index::LocalityIndex;
use crate::types::coordinate::CoordinatePair;
use bon::bon;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use log::{info, warn};
use std::io::Cursor;
use std::path::Path;

pub const NAME_HEADER: &str = "localite";
pub const LATITUDE_HEADER: &str = "latitude";
pub const LONGITUDE_HEADER: &str = "longitude";
pub const REGION_HEADER: &str = "region";
pub const COUNTRY_HEADER: &str = "country";
pub const ALTITUDE_HEADER: &str = "altitude";

/// Columns a locality spreadsheet must have. `altitude` is optional.
pub const REQUIRED_HEADERS: [&str; 5] = [
    NAME_HEADER,
    LATITUDE_HEADER,
    LONGITUDE_HEADER,
    REGION_HEADER,
    COUNTRY_HEADER,
];

/// A single spreadsheet cell, independent of the reader that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    /// Trimmed text form; `None` for an empty or blank cell.
    ///
    /// Floats use Rust's shortest round-trip formatting, so `3.848` stays
    /// `"3.848"` and a whole number such as `726.0` becomes `"726"`.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Cell::Empty => return None,
            Cell::Text(value) => value.trim().to_string(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) if value.is_finite() => value.to_string(),
            Cell::Float(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Text(value) => value.trim().parse().ok(),
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(value) => Cell::Text(value.clone()),
            Data::Int(value) => Cell::Int(*value),
            Data::Float(value) => Cell::Float(*value),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

/// One row of the locality spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalityRecord {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub altitude: Option<f64>,
}

impl LocalityRecord {
    pub fn coordinate(&self) -> CoordinatePair {
        CoordinatePair::new(&self.latitude, &self.longitude)
    }

    /// Whether both coordinate tokens are non-blank.
    pub fn has_coordinates(&self) -> bool {
        !self.latitude.trim().is_empty() && !self.longitude.trim().is_empty()
    }
}

/// Localities imported from a spreadsheet, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalityTable {
    records: Vec<LocalityRecord>,
}

#[bon]
impl LocalityTable {
    /// Reads the first worksheet of an XLSX workbook. The first row is the header.
    ///
    /// # Errors
    ///
    /// Returns [`LocalityError::SpreadsheetRead`] if the bytes are not a readable
    /// workbook, [`LocalityError::NoWorksheet`] if it has no sheet, and
    /// [`LocalityError::InvalidSpreadsheetSchema`] if a required column is missing.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self, LocalityError> {
        let mut workbook: Xlsx<_> =
            open_workbook_from_rs(Cursor::new(bytes)).map_err(LocalityError::SpreadsheetRead)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LocalityError::NoWorksheet)?
            .map_err(LocalityError::SpreadsheetRead)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(|cell| cell.to_string()).collect())
            .unwrap_or_default();
        let body = rows.map(|row| row.iter().map(Cell::from).collect::<Vec<_>>());

        Self::from_rows(headers.as_slice(), body)
    }

    /// Reads a locality spreadsheet from disk. See [`Self::from_xlsx_bytes`].
    pub fn from_xlsx_path(path: &Path) -> Result<Self, LocalityError> {
        let bytes =
            std::fs::read(path).map_err(|e| LocalityError::FileRead(path.to_path_buf(), e))?;
        info!("Importing localities from {}", path.display());
        Self::from_xlsx_bytes(&bytes)
    }

    /// Builds a table from a header row and data rows.
    ///
    /// Headers are matched after trimming. Rows without a latitude or a
    /// longitude are dropped; short rows are treated as having empty cells.
    pub fn from_rows<H: AsRef<str>>(
        headers: &[H],
        rows: impl IntoIterator<Item = Vec<Cell>>,
    ) -> Result<Self, LocalityError> {
        let position = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);

        let missing: Vec<String> = REQUIRED_HEADERS
            .into_iter()
            .filter(|name| position(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        let (Some(name_idx), Some(lat_idx), Some(lon_idx), Some(region_idx), Some(country_idx)) = (
            position(NAME_HEADER),
            position(LATITUDE_HEADER),
            position(LONGITUDE_HEADER),
            position(REGION_HEADER),
            position(COUNTRY_HEADER),
        ) else {
            return Err(LocalityError::InvalidSpreadsheetSchema { missing });
        };
        let altitude_idx = position(ALTITUDE_HEADER);

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for row in rows {
            let cell = |idx: usize| row.get(idx).cloned().unwrap_or(Cell::Empty);
            let (Some(latitude), Some(longitude)) = (cell(lat_idx).as_text(), cell(lon_idx).as_text())
            else {
                dropped += 1;
                continue;
            };
            records.push(LocalityRecord {
                name: cell(name_idx).as_text().unwrap_or_default(),
                latitude,
                longitude,
                region: cell(region_idx).as_text(),
                country: cell(country_idx).as_text(),
                altitude: altitude_idx.and_then(|idx| cell(idx).as_number()),
            });
        }

        if dropped > 0 {
            warn!("Dropped {dropped} locality row(s) without latitude or longitude");
        }
        info!("Imported {} localities", records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LocalityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct regions in first-seen order, the options of the region filter.
    pub fn regions(&self) -> Vec<String> {
        distinct(self.records.iter().filter_map(|r| r.region.as_deref()))
    }

    /// Distinct countries in first-seen order, the options of the country filter.
    pub fn countries(&self) -> Vec<String> {
        distinct(self.records.iter().filter_map(|r| r.country.as_deref()))
    }

    /// Keeps the records whose region and country are in the given sets.
    ///
    /// An unset or empty set does not filter on that axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use onacc_forecast::{Cell, LocalityTable};
    ///
    /// let headers = ["localite", "latitude", "longitude", "region", "country"];
    /// let rows = vec![
    ///     vec![Cell::from("Yaoundé"), Cell::from(3.848), Cell::from(11.5021), Cell::from("Centre"), Cell::from("Cameroun")],
    ///     vec![Cell::from("Douala"), Cell::from(4.0511), Cell::from(9.7679), Cell::from("Littoral"), Cell::from("Cameroun")],
    /// ];
    /// let table = LocalityTable::from_rows(&headers, rows)?;
    ///
    /// let centre = table.filter().regions(vec!["Centre".to_string()]).call();
    /// assert_eq!(centre.len(), 1);
    /// assert_eq!(centre.records()[0].name, "Yaoundé");
    /// # Ok::<(), onacc_forecast::LocalityError>(())
    /// ```
    #[builder]
    pub fn filter(
        &self,
        regions: Option<Vec<String>>,
        countries: Option<Vec<String>>,
    ) -> LocalityTable {
        let regions = regions.unwrap_or_default();
        let countries = countries.unwrap_or_default();
        let matches = |set: &[String], value: &Option<String>| {
            set.is_empty() || value.as_ref().is_some_and(|v| set.contains(v))
        };

        LocalityTable {
            records: self
                .records
                .iter()
                .filter(|r| matches(&regions, &r.region) && matches(&countries, &r.country))
                .cloned()
                .collect(),
        }
    }

    /// Selects every record of this table.
    pub fn select_all(&self) -> LocalitySelection {
        LocalitySelection::new(self.records.clone())
    }
}

/// The localities kept after filtering and editing.
///
/// Records whose coordinates are blank are excluded when the selection is made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalitySelection {
    records: Vec<LocalityRecord>,
}

impl LocalitySelection {
    pub fn new(records: Vec<LocalityRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .filter(LocalityRecord::has_coordinates)
                .collect(),
        }
    }

    pub fn records(&self) -> &[LocalityRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The coordinate text for the selection, in row order.
    pub fn coordinate_text(&self) -> String {
        let pairs: Vec<CoordinatePair> = self.records.iter().map(LocalityRecord::coordinate).collect();
        join_coordinates(&pairs)
    }

    pub fn index(&self) -> LocalityIndex {
        LocalityIndex::from_records(&self.records)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
