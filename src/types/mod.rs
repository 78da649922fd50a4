pub mod coordinate;
pub mod forecast_mode;
pub mod forecast_table;
pub mod variable;
