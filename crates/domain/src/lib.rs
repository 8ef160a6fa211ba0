//! # people-domain
//!
//! Pure domain model for the people service.
//!
//! ## Responsibilities
//! - Foundational types: the integer [`PersonId`](id::PersonId), error
//!   conventions, timestamps
//! - Define the [`Person`](person::Person) record and its creation input
//! - Define the fixed sample set used when seeding an empty store
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod person;
pub mod time;
