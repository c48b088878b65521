//! In-memory document store.
//!
//! # Responsibility
//! - Hold contacts for the lifetime of one store value.
//! - Serve as the per-test isolated store and as the working table of
//!   file-backed stores.
//!
//! # Invariants
//! - Ids start at 1 and are never reused by the same store value.
//! - Iteration order equals insertion order.

use super::{DocId, DocumentStore, Query, StoreResult, StoredDocument};
use crate::model::contact::Contact;
use std::collections::BTreeMap;

/// Isolated in-memory contact collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<DocId, Contact>,
    last_id: DocId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from already persisted documents.
    pub(crate) fn from_documents(documents: BTreeMap<DocId, Contact>) -> Self {
        let last_id = documents.keys().next_back().copied().unwrap_or(0);
        Self { documents, last_id }
    }

    pub(crate) fn documents(&self) -> &BTreeMap<DocId, Contact> {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&mut self, contact: &Contact) -> StoreResult<Option<DocId>> {
        self.last_id += 1;
        self.documents.insert(self.last_id, contact.clone());
        Ok(Some(self.last_id))
    }

    fn get(&self, query: &Query) -> StoreResult<Option<StoredDocument>> {
        Ok(self
            .documents
            .iter()
            .find(|(_, contact)| query.matches(contact))
            .map(|(id, contact)| StoredDocument::new(*id, contact.clone())))
    }

    fn remove(&mut self, ids: &[DocId]) -> StoreResult<Vec<DocId>> {
        Ok(ids
            .iter()
            .filter(|id| self.documents.remove(*id).is_some())
            .copied()
            .collect())
    }

    fn all(&self) -> StoreResult<Vec<StoredDocument>> {
        Ok(self
            .documents
            .iter()
            .map(|(id, contact)| StoredDocument::new(*id, contact.clone()))
            .collect())
    }
}
