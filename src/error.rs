use crate::export::error::ExportError;
use crate::localities::error::LocalityError;
use crate::request::error::RequestError;
use crate::response::error::ResponseError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid coordinate format: '{0}' (expected 'latitude,longitude')")]
    InvalidCoordinateFormat(String),

    #[error("No coordinates provided")]
    NoCoordinatesProvided,

    #[error(transparent)]
    Locality(#[from] LocalityError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to initialize HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("Unexpected data state: {0}")]
    UnexpectedData(String),
}
