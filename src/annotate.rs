//! Stamps a normalized table with the forecast mode and its parameters.

use crate::types::forecast_mode::ModeParameters;
use crate::types::forecast_table::{
    ForecastTable, CLIMATE_MODEL_COLUMN, FORECAST_DURATION_COLUMN, FORECAST_MODE_COLUMN,
};
use crate::ForecastError;
use log::debug;

/// Adds the annotation columns to every row of `table`.
///
/// * `Forecast mode` always, holding the mode label.
/// * `Climate model` for a climate projection, holding the model identifier.
/// * `Forecast duration` for a seasonal forecast, holding the duration label.
///
/// A weather forecast only gets the mode column.
pub fn annotate(
    table: ForecastTable,
    parameters: &ModeParameters,
) -> Result<ForecastTable, ForecastError> {
    let mode = parameters.mode();
    debug!("Annotating {} rows as {}", table.height(), mode);

    let table = table.with_constant_column(FORECAST_MODE_COLUMN, mode.label())?;
    let table = match parameters {
        ModeParameters::Weather(_) => table,
        ModeParameters::Seasonal(duration) => {
            table.with_constant_column(FORECAST_DURATION_COLUMN, duration.label())?
        }
        ModeParameters::ClimateProjection { model, .. } => {
            table.with_constant_column(CLIMATE_MODEL_COLUMN, model.identifier())?
        }
    };
    Ok(table)
}
