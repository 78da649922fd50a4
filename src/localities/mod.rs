pub mod error;
pub mod locality_index;
pub mod locality_table;
