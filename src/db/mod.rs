pub mod keyed_table;
pub mod models;
pub mod pool;
pub mod tables;

pub use keyed_table::{KeyedTable, Snowflake, TableSchema};
