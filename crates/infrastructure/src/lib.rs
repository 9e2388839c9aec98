//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod postgres_payload_repository;

pub use postgres_payload_repository::PostgresPayloadRepository;

/// Embedded schema migrations for the payload store.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
