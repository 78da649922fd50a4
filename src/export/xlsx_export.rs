use crate::export::error::ExportError;
use crate::types::forecast_table::ForecastTable;
use crate::utils::days_to_date;
use chrono::Datelike;
use polars::prelude::{Column, DataType};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};

/// Name of the single worksheet in an XLSX export.
pub const SHEET_NAME: &str = "Forecast";

/// Writes the table as a single-sheet XLSX workbook.
///
/// The first row holds the column names in bold. Numbers are written as
/// numeric cells, dates as date cells shown as `yyyy-mm-dd`, and missing
/// values are left empty.
pub fn to_xlsx_bytes(table: &ForecastTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, column) in (0u16..).zip(table.frame.get_columns()) {
        sheet.write_string_with_format(0, col, column.name().as_str(), &header)?;
        write_column(sheet, col, column)?;
    }
    sheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

fn write_column(sheet: &mut Worksheet, col: u16, column: &Column) -> Result<(), ExportError> {
    let failed = |source| ExportError::Column {
        column: column.name().to_string(),
        source,
    };

    match column.dtype() {
        DataType::Float64 => {
            for (idx, value) in column.f64().map_err(failed)?.into_iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_number(data_row(idx)?, col, value)?;
                }
            }
        }
        DataType::Date => {
            let date_format = Format::new().set_num_format("yyyy-mm-dd");
            let days = column.cast(&DataType::Int32).map_err(failed)?;
            for (idx, value) in days.i32().map_err(failed)?.into_iter().enumerate() {
                if let Some(date) = value.and_then(days_to_date) {
                    let cell = excel_date(date.year(), date.month(), date.day())?;
                    sheet.write_datetime_with_format(data_row(idx)?, col, &cell, &date_format)?;
                }
            }
        }
        _ => {
            let text = column.cast(&DataType::String).map_err(failed)?;
            for (idx, value) in text.str().map_err(failed)?.into_iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_string(data_row(idx)?, col, value)?;
                }
            }
        }
    }
    Ok(())
}

fn excel_date(year: i32, month: u32, day: u32) -> Result<ExcelDateTime, ExportError> {
    let year = u16::try_from(year).map_err(|_| ExportError::DateOutOfRange(year))?;
    Ok(ExcelDateTime::from_ymd(year, month as u8, day as u8)?)
}

/// Worksheet row of data row `idx`; row 0 is the header.
fn data_row(idx: usize) -> Result<u32, ExportError> {
    u32::try_from(idx + 1).map_err(|_| ExportError::TooManyRows(idx + 1))
}
