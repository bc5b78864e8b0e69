pub mod schema;
pub mod connection;
pub mod repositories;

pub use connection::{missing_tables, Database, DbConnection, DbPool};
