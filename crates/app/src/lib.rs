//! # people-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the `PersonRepository` **port trait** that storage adapters implement
//! - Provide `PersonService`, the driving port used by the HTTP adapter:
//!   list, get, create, update, delete, and idempotent seeding
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `people-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
