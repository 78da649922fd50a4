//! Human-readable reasons for failed API calls.

use serde::Deserialize;

/// Error body returned by Open-Meteo, e.g. `{"error": true, "reason": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Fixed message for a status code when the body carries no reason.
pub fn status_reason(code: u16) -> String {
    match code {
        400 => "Invalid request parameters".to_string(),
        401 => "Authentication required".to_string(),
        403 => "Access forbidden".to_string(),
        404 => "Endpoint not found".to_string(),
        500 => "Weather service internal error".to_string(),
        other => format!("HTTP {other}"),
    }
}

/// Extracts the `reason` field of a JSON error body, if there is one.
pub(crate) fn body_reason(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.reason)
        .filter(|reason| !reason.trim().is_empty())
}
