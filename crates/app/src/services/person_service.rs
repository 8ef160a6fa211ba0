//! Person service: use-cases for managing people.

use people_domain::error::{NotFoundError, PeopleError};
use people_domain::id::PersonId;
use people_domain::person::{self, NewPerson, Person};

pub use crate::ports::SeedReport;
use crate::ports::PersonRepository;

/// Application service for person CRUD operations.
pub struct PersonService<R> {
    repo: R,
}

fn not_found(id: PersonId) -> PeopleError {
    NotFoundError {
        entity: "Person",
        id: id.to_string(),
    }
    .into()
}

impl<R: PersonRepository> PersonService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every person ordered by last name, then first name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_people(&self) -> Result<Vec<Person>, PeopleError> {
        self.repo.get_all().await
    }

    /// Look up a person by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`PeopleError::NotFound`] when no person with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_person(&self, id: PersonId) -> Result<Person, PeopleError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Store a new person. The id is assigned by storage.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn create_person(&self, input: NewPerson) -> Result<Person, PeopleError> {
        let person = self.repo.create(input).await?;
        tracing::debug!(id = %person.id, "person created");
        Ok(person)
    }

    /// Overwrite every field of an existing person.
    ///
    /// # Errors
    ///
    /// Returns [`PeopleError::NotFound`] when no person with `id` exists,
    /// or a storage error from the repository.
    pub async fn update_person(
        &self,
        id: PersonId,
        input: NewPerson,
    ) -> Result<Person, PeopleError> {
        if !self.repo.exists(id).await? {
            return Err(not_found(id));
        }
        // the row may vanish between the two calls; report that as not found too
        self.repo
            .update(id, input)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Delete a person by id.
    ///
    /// # Errors
    ///
    /// Returns [`PeopleError::NotFound`] when no person with `id` exists,
    /// or a storage error from the repository.
    pub async fn delete_person(&self, id: PersonId) -> Result<(), PeopleError> {
        if self.repo.delete(id).await? {
            tracing::debug!(%id, "person deleted");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    /// Populate an empty store with the fixed sample set.
    ///
    /// Does nothing when at least one person is already stored, so calling
    /// it repeatedly, even concurrently, never duplicates the samples.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn seed(&self) -> Result<SeedReport, PeopleError> {
        let report = self.repo.seed_if_empty(person::samples()).await?;
        if report.skipped {
            tracing::debug!(total = report.total, "store not empty, seed skipped");
        } else {
            tracing::info!(added = report.added, total = report.total, "seeded sample people");
        }
        Ok(report)
    }
}
