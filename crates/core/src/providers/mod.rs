pub mod traits;

// Quote source implementations
pub mod static_table;
