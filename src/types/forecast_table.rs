//! Contains the `ForecastTable` structure, the normalized output of a submission.

use crate::types::coordinate::CoordinatePair;
use crate::types::variable::{DailyVariable, VariableSelection};
use crate::utils::{days_to_date, get_opt_float, get_opt_str};
use crate::ForecastError;
use chrono::NaiveDate;
use polars::prelude::{col, lit, Column, DataFrame, DataType, IntoLazy, PolarsError};
use std::collections::BTreeMap;
use std::fmt;

pub const LOCALITY_COLUMN: &str = "Locality";
pub const DATE_COLUMN: &str = "Date";
pub const LATITUDE_COLUMN: &str = "Latitude";
pub const LONGITUDE_COLUMN: &str = "Longitude";
pub const FORECAST_MODE_COLUMN: &str = "Forecast mode";
pub const CLIMATE_MODEL_COLUMN: &str = "Climate model";
pub const FORECAST_DURATION_COLUMN: &str = "Forecast duration";

/// One date of one location.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    /// Locality name, or `"N/A"` when the coordinate is not in the locality index.
    pub locality: String,
    pub date: NaiveDate,
    /// Latitude token exactly as it was requested.
    pub latitude: String,
    /// Longitude token exactly as it was requested.
    pub longitude: String,
    /// One entry per requested variable. `None` means the API had no value for that date.
    pub values: BTreeMap<DailyVariable, Option<f64>>,
    /// Set once the table has been annotated.
    pub forecast_mode: Option<String>,
    /// Climate model or seasonal duration, depending on the mode.
    pub mode_detail: Option<String>,
}

impl ForecastRow {
    /// Value of `variable` on this row; `None` if missing or not requested.
    pub fn value(&self, variable: DailyVariable) -> Option<f64> {
        self.values.get(&variable).copied().flatten()
    }
}

/// A location that was left out of a multi-location table, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationWarning {
    /// Position of the coordinate in the submitted list.
    pub index: usize,
    pub coordinate: CoordinatePair,
    pub reason: String,
}

impl fmt::Display for LocationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "location #{} ({}) skipped: {}",
            self.index, self.coordinate, self.reason
        )
    }
}

/// The normalized forecast of a submission.
///
/// Rows are grouped by coordinate in request order, each group sorted by date.
/// The column set is `Locality, Date, Latitude, Longitude`, followed by one
/// column per requested variable in [`DailyVariable`] declaration order, followed
/// by the annotation columns once [`crate::annotate()`] has run.
///
/// The data lives in a Polars [`DataFrame`] so it can be filtered, written to
/// CSV or handed to plotting code directly.
#[derive(Debug, Clone)]
pub struct ForecastTable {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
    variables: VariableSelection,
    warnings: Vec<LocationWarning>,
}

impl ForecastTable {
    /// Builds a table from normalized rows.
    ///
    /// Every requested variable gets a column even if no row has a value for it,
    /// so the schema only depends on `variables`.
    pub fn from_rows(
        rows: &[ForecastRow],
        variables: VariableSelection,
        warnings: Vec<LocationWarning>,
    ) -> Result<Self, PolarsError> {
        let mut columns = vec![
            Column::new(
                LOCALITY_COLUMN.into(),
                rows.iter().map(|r| r.locality.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                DATE_COLUMN.into(),
                rows.iter().map(|r| r.date).collect::<Vec<NaiveDate>>(),
            ),
            Column::new(
                LATITUDE_COLUMN.into(),
                rows.iter().map(|r| r.latitude.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                LONGITUDE_COLUMN.into(),
                rows.iter().map(|r| r.longitude.as_str()).collect::<Vec<_>>(),
            ),
        ];
        for variable in variables.iter() {
            columns.push(Column::new(
                variable.column_name().into(),
                rows.iter()
                    .map(|r| r.value(variable))
                    .collect::<Vec<Option<f64>>>(),
            ));
        }

        Ok(Self {
            frame: DataFrame::new(columns)?,
            variables,
            warnings,
        })
    }

    /// The variables this table has columns for.
    pub fn variables(&self) -> VariableSelection {
        self.variables
    }

    /// Locations that were skipped while normalizing a multi-location response.
    pub fn warnings(&self) -> &[LocationWarning] {
        &self.warnings
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Column headers in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Distinct coordinates in the order their groups appear.
    pub fn coordinates(&self) -> Result<Vec<CoordinatePair>, PolarsError> {
        let latitudes = self.frame.column(LATITUDE_COLUMN)?.str()?;
        let longitudes = self.frame.column(LONGITUDE_COLUMN)?.str()?;

        let mut pairs: Vec<CoordinatePair> = Vec::new();
        for (lat, lon) in latitudes.into_iter().zip(longitudes) {
            if let (Some(lat), Some(lon)) = (lat, lon) {
                let pair = CoordinatePair::new(lat, lon);
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
        Ok(pairs)
    }

    /// Returns the rows belonging to one coordinate, as a new table.
    pub fn for_coordinate(&self, pair: &CoordinatePair) -> Result<ForecastTable, PolarsError> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(
                col(LATITUDE_COLUMN)
                    .eq(lit(pair.latitude.clone()))
                    .and(col(LONGITUDE_COLUMN).eq(lit(pair.longitude.clone()))),
            )
            .collect()?;
        Ok(Self {
            frame,
            variables: self.variables,
            warnings: Vec::new(),
        })
    }

    /// Adds (or replaces) a column holding the same text on every row.
    pub(crate) fn with_constant_column(
        mut self,
        name: &str,
        value: &str,
    ) -> Result<Self, PolarsError> {
        let height = self.frame.height();
        self.frame
            .with_column(Column::new(name.into(), vec![value; height]))?;
        Ok(self)
    }

    /// Collects the table into row structs.
    pub fn rows(&self) -> Result<Vec<ForecastRow>, ForecastError> {
        let frame = &self.frame;
        let localities = frame.column(LOCALITY_COLUMN)?;
        let latitudes = frame.column(LATITUDE_COLUMN)?;
        let longitudes = frame.column(LONGITUDE_COLUMN)?;
        let dates = frame.column(DATE_COLUMN)?.cast(&DataType::Int32)?;
        let dates = dates.i32()?;
        let modes = frame.column(FORECAST_MODE_COLUMN).ok();
        let details = frame
            .column(CLIMATE_MODEL_COLUMN)
            .or_else(|_| frame.column(FORECAST_DURATION_COLUMN))
            .ok();
        let value_columns = self
            .variables
            .iter()
            .map(|variable| Ok((variable, frame.column(variable.column_name())?)))
            .collect::<Result<Vec<_>, PolarsError>>()?;

        let mut rows = Vec::with_capacity(frame.height());
        for idx in 0..frame.height() {
            let date = dates
                .get(idx)
                .and_then(days_to_date)
                .ok_or_else(|| ForecastError::UnexpectedData(format!("row {idx} has no date")))?;
            rows.push(ForecastRow {
                locality: get_opt_str(localities, idx).unwrap_or_default(),
                date,
                latitude: get_opt_str(latitudes, idx).unwrap_or_default(),
                longitude: get_opt_str(longitudes, idx).unwrap_or_default(),
                values: value_columns
                    .iter()
                    .map(|(variable, column)| (*variable, get_opt_float(column, idx)))
                    .collect(),
                forecast_mode: modes.and_then(|c| get_opt_str(c, idx)),
                mode_detail: details.and_then(|c| get_opt_str(c, idx)),
            });
        }
        Ok(rows)
    }
}
