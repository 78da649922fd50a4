//! Presentation of a forecast table: chart description and download encodings.

pub mod chart;
pub mod csv_export;
pub mod error;
pub mod xlsx_export;

use crate::types::forecast_table::ForecastTable;
use error::ExportError;

pub const CSV_FILE_NAME: &str = "onacc_forecast.csv";
pub const XLSX_FILE_NAME: &str = "onacc_forecast.xlsx";
pub const CSV_MIME_TYPE: &str = "text/csv";
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A download encoding of a [`ForecastTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Suggested file name for the download.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_FILE_NAME,
            ExportFormat::Xlsx => XLSX_FILE_NAME,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME_TYPE,
            ExportFormat::Xlsx => XLSX_MIME_TYPE,
        }
    }

    /// Encodes `table` in this format.
    pub fn encode(&self, table: &ForecastTable) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportFormat::Csv => csv_export::to_csv_bytes(table),
            ExportFormat::Xlsx => xlsx_export::to_xlsx_bytes(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::variable::VariableSelection;

    #[test]
    fn test_download_metadata() {
        assert_eq!(ExportFormat::Csv.file_name(), "onacc_forecast.csv");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Xlsx.file_name(), "onacc_forecast.xlsx");
    }

    #[test]
    fn test_empty_table_still_has_header() -> Result<(), ExportError> {
        let table =
            ForecastTable::from_rows(&[], VariableSelection::none(), Vec::new()).unwrap();
        let csv = ExportFormat::Csv.encode(&table)?;
        assert_eq!(
            String::from_utf8(csv).unwrap().trim_end(),
            "Locality,Date,Latitude,Longitude"
        );
        assert!(!ExportFormat::Xlsx.encode(&table)?.is_empty());
        Ok(())
    }
}
