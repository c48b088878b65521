//! Equality predicates over contact fields.
//!
//! # Invariants
//! - A query is a conjunction; an empty query matches every document.
//! - Comparison is exact (case and whitespace sensitive).

use crate::model::contact::Contact;

/// Persisted contact field addressable by a [`Query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    PhoneNumber,
    Address,
}

impl Field {
    /// Name used in persisted documents and SQL columns.
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::PhoneNumber => "phone_number",
            Self::Address => "address",
        }
    }

    pub fn value_of(self, contact: &Contact) -> &str {
        match self {
            Self::FirstName => &contact.first_name,
            Self::LastName => &contact.last_name,
            Self::PhoneNumber => &contact.phone_number,
            Self::Address => &contact.address,
        }
    }
}

/// Conjunction of exact-match field tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    conditions: Vec<(Field, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches documents sharing the contact's first and last name.
    pub fn natural_key(contact: &Contact) -> Self {
        let key = contact.natural_key();
        Self::new()
            .field_eq(Field::FirstName, key.first_name)
            .field_eq(Field::LastName, key.last_name)
    }

    pub fn field_eq(mut self, field: Field, value: impl Into<String>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    pub fn conditions(&self) -> &[(Field, String)] {
        &self.conditions
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| field.value_of(contact) == expected)
    }
}
