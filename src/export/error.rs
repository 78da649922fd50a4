use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV export")]
    Csv(#[source] PolarsError),

    #[error("Failed to write XLSX export")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to serialize chart")]
    Chart(#[from] serde_json::Error),

    #[error("Failed reading column '{column}' for export")]
    Column {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Year {0} cannot be written as a worksheet date")]
    DateOutOfRange(i32),

    #[error("Table has too many rows for a worksheet ({0})")]
    TooManyRows(usize),
}
