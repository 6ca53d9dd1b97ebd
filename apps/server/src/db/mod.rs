//! Database layer - Postgres storage adapter

pub mod pool;
pub mod schema;
pub mod sql;
pub mod store;

pub use pool::create_pool;
pub use schema::ensure_schema;
pub use store::PostgresPropertyStore;
