pub mod api_status;
pub mod error;
pub mod normalizer;
pub mod raw_response;
