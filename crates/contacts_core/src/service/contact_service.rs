//! Contact use-case service.
//!
//! # Responsibility
//! - Provide save/find/exists/delete/list entry points keyed by natural key.
//! - Own the injected document store and allow swapping it at runtime.
//!
//! # Invariants
//! - `save` performs no uniqueness check; duplicate natural keys coexist.
//! - Validation runs only when the caller asks for it and never touches the
//!   store on failure.
//! - `delete` removes at most the first natural-key match per call.
//! - Store contents are never cached here; a replaced store is observed by
//!   the very next call.

use crate::model::contact::{Contact, ContactValidationError};
use crate::store::{DocId, DocumentStore, Query, StoreError, StoredDocument};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message carried by a successful [`SaveReceipt`].
pub const CONTACT_ADDED_MESSAGE: &str = "contact added";

pub type ContactResult<T> = Result<T, ContactError>;

/// Error for contact use-cases.
#[derive(Debug)]
pub enum ContactError {
    /// Caller-recoverable validation failure.
    Validation(ContactValidationError),
    /// Store transport failure.
    Store(StoreError),
}

impl Display for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ContactValidationError> for ContactError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ContactError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Success marker returned by [`ContactService::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Id assigned by the store to the new document.
    pub id: DocId,
    pub message: &'static str,
}

/// Contact book operations over an injected document store.
pub struct ContactService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> ContactService<S> {
    /// Creates a service persisting to `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists `contact` as a new document.
    ///
    /// # Contract
    /// - With `validate = true`, validation errors are returned unchanged and
    ///   nothing is inserted.
    /// - Existing documents with the same natural key are left alone and a
    ///   duplicate is inserted.
    /// - Returns `Ok(None)` when the store declines the insert.
    pub fn save(&mut self, contact: &Contact, validate: bool) -> ContactResult<Option<SaveReceipt>> {
        if validate {
            if let Err(err) = contact.validate() {
                warn!(
                    "event=contact_save module=service status=rejected reason=validation contact={}",
                    contact.summary()
                );
                return Err(err.into());
            }
        }

        match self.store.insert(contact)? {
            Some(id) => {
                info!("event=contact_save module=service status=ok id={id}");
                Ok(Some(SaveReceipt {
                    id,
                    message: CONTACT_ADDED_MESSAGE,
                }))
            }
            None => {
                warn!(
                    "event=contact_save module=service status=declined contact={}",
                    contact.summary()
                );
                Ok(None)
            }
        }
    }

    /// Returns the first stored document sharing `contact`'s natural key.
    pub fn find(&self, contact: &Contact) -> ContactResult<Option<StoredDocument>> {
        Ok(self.store.get(&Query::natural_key(contact))?)
    }

    /// Returns whether any stored document shares `contact`'s natural key.
    pub fn exists(&self, contact: &Contact) -> ContactResult<bool> {
        Ok(self.find(contact)?.is_some())
    }

    /// Removes the first stored document sharing `contact`'s natural key.
    ///
    /// Returns the removed ids; empty when nothing matched.
    pub fn delete(&mut self, contact: &Contact) -> ContactResult<Vec<DocId>> {
        let Some(document) = self.find(contact)? else {
            return Ok(Vec::new());
        };

        let removed = self.store.remove(&[document.id])?;
        info!(
            "event=contact_delete module=service status=ok removed={}",
            removed.len()
        );
        Ok(removed)
    }

    /// Returns every stored contact in store-native order.
    pub fn list_all(&self) -> ContactResult<Vec<Contact>> {
        Ok(self
            .store
            .all()?
            .into_iter()
            .map(StoredDocument::into_contact)
            .collect())
    }

    /// Swaps the backing store and returns the previous one.
    pub fn replace_store(&mut self, store: S) -> S {
        std::mem::replace(&mut self.store, store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
