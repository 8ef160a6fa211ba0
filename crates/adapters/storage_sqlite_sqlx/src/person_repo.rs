//! `SQLite` implementation of [`PersonRepository`].
//!
//! Every operation checks one connection out of the pool for its own scope
//! and hands it back when that scope ends, whatever the outcome.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use people_app::ports::{PersonRepository, SeedReport};
use people_domain::error::PeopleError;
use people_domain::id::PersonId;
use people_domain::person::{NewPerson, Person};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Person`].
struct Wrapper(Person);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Person> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Person {
            id: PersonId::new(row.try_get("id")?),
            first_name: row.try_get("firstName")?,
            last_name: row.try_get("lastName")?,
            age: row.try_get("age")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO People (firstName, lastName, age) VALUES (?, ?, ?) \
    RETURNING id, firstName, lastName, age";
const SELECT_BY_ID: &str = "SELECT id, firstName, lastName, age FROM People WHERE id = ?";
const SELECT_ALL: &str =
    "SELECT id, firstName, lastName, age FROM People ORDER BY lastName, firstName, id";
const UPDATE: &str = "UPDATE People SET firstName = ?, lastName = ?, age = ? WHERE id = ? \
    RETURNING id, firstName, lastName, age";
const DELETE_BY_ID: &str = "DELETE FROM People WHERE id = ?";
const COUNT: &str = "SELECT COUNT(*) FROM People";
const EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM People WHERE id = ?)";
const SEED_PREFIX: &str =
    "INSERT INTO People (firstName, lastName, age) SELECT column1, column2, column3 FROM (";
const SEED_SUFFIX: &str = ") WHERE NOT EXISTS (SELECT 1 FROM People)";

/// `SQLite`-backed person repository.
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PersonRepository for SqlitePersonRepository {
    fn create(&self, input: NewPerson) -> impl Future<Output = Result<Person, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::from)?;
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(&input.first_name)
                .bind(&input.last_name)
                .bind(input.age)
                .fetch_one(&mut *conn)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<Person>, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::from)?;
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&mut *conn)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Person>, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::from)?;
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&mut *conn)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        id: PersonId,
        input: NewPerson,
    ) -> impl Future<Output = Result<Option<Person>, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::from)?;
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(&input.first_name)
                .bind(&input.last_name)
                .bind(input.age)
                .bind(id.get())
                .fetch_optional(&mut *conn)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: PersonId) -> impl Future<Output = Result<bool, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::from)?;
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&mut *conn)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn count(&self) -> impl Future<Output = Result<u64, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::from)?;
            let count: i64 = sqlx::query_scalar(COUNT)
                .fetch_one(&mut *conn)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }

    fn exists(&self, id: PersonId) -> impl Future<Output = Result<bool, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::from)?;
            let found: i64 = sqlx::query_scalar(EXISTS)
                .bind(id.get())
                .fetch_one(&mut *conn)
                .await
                .map_err(StorageError::from)?;

            Ok(found != 0)
        }
    }

    fn seed_if_empty(
        &self,
        samples: Vec<NewPerson>,
    ) -> impl Future<Output = Result<SeedReport, PeopleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            // A single INSERT .. WHERE NOT EXISTS takes the write lock before
            // it reads, so concurrent seeders serialize on it.
            let added = if samples.is_empty() {
                0
            } else {
                let mut query = QueryBuilder::<Sqlite>::new(SEED_PREFIX);
                query.push_values(samples, |mut row, person| {
                    row.push_bind(person.first_name)
                        .push_bind(person.last_name)
                        .push_bind(person.age);
                });
                query.push(SEED_SUFFIX);
                query
                    .build()
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?
                    .rows_affected()
            };
            let total: i64 = sqlx::query_scalar(COUNT)
                .fetch_one(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            tx.commit().await.map_err(StorageError::from)?;

            Ok(SeedReport {
                added,
                total: total.unsigned_abs(),
                skipped: added == 0,
            })
        }
    }
}
