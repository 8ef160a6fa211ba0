//! # people-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `PersonRepository` port defined in `people-app::ports::storage`
//! - Manage the `SQLite` connection pool lifecycle
//! - Create the schema on startup when it is absent (no versioned migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `people-app` (for port traits) and `people-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod person_repo;
pub mod pool;

pub use person_repo::SqlitePersonRepository;
pub use pool::{Config, Database};
