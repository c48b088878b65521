//! Core domain logic for the contact book.
//! This crate is the single source of truth for contact validation and the
//! natural-key persistence contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{normalize_phone_number, Contact, ContactValidationError, NaturalKey};
pub use service::contact_service::{
    ContactError, ContactResult, ContactService, SaveReceipt, CONTACT_ADDED_MESSAGE,
};
pub use store::json_store::{default_store_path, JsonFileStore, DEFAULT_STORE_FILE};
pub use store::memory_store::MemoryStore;
pub use store::sqlite_store::SqliteStore;
pub use store::{
    DocId, DocumentStore, Field, Query, StoreError, StoreResult, StoredDocument,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
