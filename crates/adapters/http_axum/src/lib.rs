//! # people-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** under `/api/people` plus the `/api/meta`
//!   and `/health` probes
//! - Publish an **OpenAPI document** generated from the handler annotations
//! - Serve **static assets** from a configured directory, with `index.html`
//!   fallback for directories
//! - Apply the **CORS policy** built from the configured origin list
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `people-app` (for port traits and services) and `people-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod openapi;
pub mod router;
pub mod state;
