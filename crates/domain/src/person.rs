//! Person: the single resource exposed by the service.

use crate::id::PersonId;

/// A stored person record.
///
/// No field is nullable: absent input coerces to the zero value of its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl Person {
    /// Attach a storage-assigned identifier to creation input.
    #[must_use]
    pub fn from_new(id: PersonId, input: NewPerson) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            age: input.age,
        }
    }

    /// Replace every mutable field with `input`.
    ///
    /// Fields missing from `input` were already defaulted, so an update
    /// never merges with the previous values.
    pub fn overwrite(&mut self, input: NewPerson) {
        self.first_name = input.first_name;
        self.last_name = input.last_name;
        self.age = input.age;
    }
}

/// The client-writable part of a [`Person`], used for both create and update.
///
/// Carries no id: identifiers are only ever assigned by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl NewPerson {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: i32) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }
}

/// Sample records inserted when seeding an empty store.
#[must_use]
pub fn samples() -> Vec<NewPerson> {
    vec![
        NewPerson::new("Ada", "Lovelace", 36),
        NewPerson::new("Grace", "Hopper", 85),
        NewPerson::new("Alan", "Turing", 41),
        NewPerson::new("Katherine", "Johnson", 101),
        NewPerson::new("Edsger", "Dijkstra", 72),
    ]
}
