pub mod error;
pub mod query_builder;
