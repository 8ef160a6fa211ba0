//! Storage port: repository trait for persisting people.

use std::future::Future;

use people_domain::error::PeopleError;
use people_domain::id::PersonId;
use people_domain::person::{NewPerson, Person};

/// Outcome of seeding the store with sample people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of sample records inserted by this call.
    pub added: u64,
    /// Number of records stored after the call.
    pub total: u64,
    /// `true` when the store already held data and nothing was inserted.
    pub skipped: bool,
}

/// Repository for persisting and querying [`Person`]s.
///
/// A missing id is never an error: lookups return `None` and mutations
/// report whether a row was touched, so callers can tell "not found" apart
/// from a storage fault.
pub trait PersonRepository {
    /// Insert a new person, letting storage assign the next unique id.
    fn create(&self, input: NewPerson) -> impl Future<Output = Result<Person, PeopleError>> + Send;

    /// Get a person by id.
    fn get_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<Person>, PeopleError>> + Send;

    /// Get every person ordered by last name, then first name, then id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Person>, PeopleError>> + Send;

    /// Overwrite every field of the person with `id`.
    ///
    /// Returns `None` when no such person exists.
    fn update(
        &self,
        id: PersonId,
        input: NewPerson,
    ) -> impl Future<Output = Result<Option<Person>, PeopleError>> + Send;

    /// Delete the person with `id`, returning whether a row was removed.
    fn delete(&self, id: PersonId) -> impl Future<Output = Result<bool, PeopleError>> + Send;

    /// Count stored people.
    fn count(&self) -> impl Future<Output = Result<u64, PeopleError>> + Send;

    /// Check whether a person with `id` exists.
    fn exists(&self, id: PersonId) -> impl Future<Output = Result<bool, PeopleError>> + Send;

    /// Insert `samples` only if the store is empty.
    ///
    /// The emptiness check and the inserts form one atomic step: of several
    /// concurrent callers on an empty store, exactly one inserts and the rest
    /// report `skipped`.
    fn seed_if_empty(
        &self,
        samples: Vec<NewPerson>,
    ) -> impl Future<Output = Result<SeedReport, PeopleError>> + Send;
}
