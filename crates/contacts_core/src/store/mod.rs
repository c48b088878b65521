//! Document store contracts and backends.
//!
//! # Responsibility
//! - Define the key-less document collection the contact service persists to.
//! - Provide in-memory, JSON file and SQLite implementations of that contract.
//!
//! # Invariants
//! - Stores assign document ids; callers never choose them.
//! - Stores do not enforce uniqueness of any field, natural key included.
//! - `get` and `all` observe store-native (insertion) order.

use crate::db::DbError;
use crate::model::contact::Contact;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_store;
pub mod memory_store;
pub mod query;
pub mod sqlite_store;

pub use query::{Field, Query};

/// Store-assigned document identifier.
pub type DocId = u64;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted form of a contact: its four fields plus the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub id: DocId,
    pub contact: Contact,
}

impl StoredDocument {
    pub fn new(id: DocId, contact: Contact) -> Self {
        Self { id, contact }
    }

    /// Detaches the contact from its stored identity.
    pub fn into_contact(self) -> Contact {
        self.contact
    }
}

/// Transport-level failure raised by a store backend.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o failed: {err}"),
            Self::Serialization(err) => write!(f, "store serialization failed: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-less document collection holding contacts.
pub trait DocumentStore {
    /// Inserts a new document and returns its id.
    ///
    /// `Ok(None)` means the store declined the insert without failing.
    fn insert(&mut self, contact: &Contact) -> StoreResult<Option<DocId>>;
    /// Returns the first document matching `query`, in store-native order.
    fn get(&self, query: &Query) -> StoreResult<Option<StoredDocument>>;
    /// Removes the given ids and returns the ones that were present.
    fn remove(&mut self, ids: &[DocId]) -> StoreResult<Vec<DocId>>;
    /// Returns every document in store-native order.
    fn all(&self) -> StoreResult<Vec<StoredDocument>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn insert(&mut self, contact: &Contact) -> StoreResult<Option<DocId>> {
        (**self).insert(contact)
    }

    fn get(&self, query: &Query) -> StoreResult<Option<StoredDocument>> {
        (**self).get(query)
    }

    fn remove(&mut self, ids: &[DocId]) -> StoreResult<Vec<DocId>> {
        (**self).remove(ids)
    }

    fn all(&self) -> StoreResult<Vec<StoredDocument>> {
        (**self).all()
    }
}
