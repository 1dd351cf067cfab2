//! Post persistence: SQL via SeaORM, plus an in-memory fallback.

mod connection;
mod memory;

#[cfg(feature = "database")]
mod sql_base;
#[cfg(feature = "database")]
pub mod sql_repo;

#[cfg(feature = "database")]
pub mod entity;

pub use connection::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "database")]
pub use connection::connect;
#[cfg(feature = "database")]
pub use sea_orm::DbConn;
#[cfg(feature = "database")]
pub use sql_repo::SqlPostRepository;

#[cfg(feature = "database")]
#[cfg(test)]
mod tests;
