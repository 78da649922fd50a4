use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("API error {code}: {reason}")]
    ApiError { code: u16, reason: String },

    #[error("Response contains no daily data")]
    MissingDailyData,

    #[error("No valid data found in the response")]
    NoValidData,
}
