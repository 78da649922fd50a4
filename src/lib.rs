mod annotate;
mod client;
mod coordinates;
mod error;
mod export;
mod localities;
mod pipeline;
mod request;
mod response;
mod session;
mod types;
mod utils;

pub use error::ForecastError;
pub use pipeline::*;
pub use session::SessionState;

pub use annotate::annotate;
pub use client::*;
pub use coordinates::{join_coordinates, parse_coordinates, PAIR_SEPARATOR};

pub use localities::locality_index::{LocalityIndex, UNKNOWN_LOCALITY};
pub use localities::locality_table::*;

pub use request::query_builder::*;

pub use response::api_status::status_reason;
pub use response::normalizer::normalize_response;
pub use response::raw_response::RawResponse;

pub use export::chart::*;
pub use export::csv_export::to_csv_bytes;
pub use export::xlsx_export::{to_xlsx_bytes, SHEET_NAME};
pub use export::{
    ExportFormat, CSV_FILE_NAME, CSV_MIME_TYPE, XLSX_FILE_NAME, XLSX_MIME_TYPE,
};

pub use types::coordinate::*;
pub use types::forecast_mode::*;
pub use types::forecast_table::*;
pub use types::variable::*;

pub use export::error::ExportError;
pub use localities::error::LocalityError;
pub use request::error::RequestError;
pub use response::error::ResponseError;
