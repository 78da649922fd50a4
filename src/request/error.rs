use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid date range {start} to {end}: {reason}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    #[error("A forecast request needs at least one coordinate")]
    NoCoordinates,

    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
