use crate::export::error::ExportError;
use crate::types::forecast_table::ForecastTable;
use polars::prelude::{CsvWriter, SerWriter};

/// Writes the table as UTF-8 CSV.
///
/// The header row follows the table column order and there is no index
/// column. Dates are ISO `YYYY-MM-DD`; a missing value is an empty field.
pub fn to_csv_bytes(table: &ForecastTable) -> Result<Vec<u8>, ExportError> {
    let mut frame = table.frame.clone();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_date_format(Some("%Y-%m-%d".to_string()))
        .finish(&mut frame)
        .map_err(ExportError::Csv)?;
    Ok(buffer)
}
