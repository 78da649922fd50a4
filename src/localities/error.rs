use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalityError {
    #[error(
        "Invalid spreadsheet structure, missing required column(s): {}",
        .missing.join(", ")
    )]
    InvalidSpreadsheetSchema { missing: Vec<String> },

    #[error("Spreadsheet contains no worksheet")]
    NoWorksheet,

    #[error("Failed to read spreadsheet")]
    SpreadsheetRead(#[source] calamine::XlsxError),

    #[error("Failed to read spreadsheet file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),
}
