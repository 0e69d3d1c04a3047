//! Database module - PostgreSQL connection pool and repositories

pub mod connection;
pub mod postgres;

pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::PgUserRepository;
