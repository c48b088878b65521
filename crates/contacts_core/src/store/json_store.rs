//! JSON file document store.
//!
//! # Responsibility
//! - Persist contacts to one human-readable, indented JSON file.
//! - Keep the on-disk layout readable by hand and stable across runs.
//!
//! # Invariants
//! - Layout is `{ "<table>": { "<id>": { first_name, last_name,
//!   phone_number, address } } }`.
//! - Contacts live in `_default`; other tables are carried through untouched.
//! - Mutations are staged, written, and only then applied in memory, so a
//!   failed write leaves the store exactly as it was.
//! - A missing or empty file is an empty collection.

use super::memory_store::MemoryStore;
use super::{DocId, DocumentStore, Query, StoreError, StoreResult, StoredDocument};
use crate::model::contact::Contact;
use log::{debug, error, info};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Store file used when the caller does not pick one.
pub const DEFAULT_STORE_FILE: &str = "db.json";
/// Table holding contacts inside the store file.
pub const DEFAULT_TABLE: &str = "_default";

type FileLayout = BTreeMap<String, Value>;

/// Contact collection backed by an indented JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: MemoryStore,
    other_tables: FileLayout,
}

impl JsonFileStore {
    /// Opens (or lazily creates) the store file at `path`.
    ///
    /// # Errors
    /// - Returns `Io` when the file exists but cannot be read.
    /// - Returns `Serialization` or `InvalidData` when the file is corrupt.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let started_at = Instant::now();
        info!("event=store_open module=store status=start backend=json");

        match load_layout(&path) {
            Ok((table, other_tables)) => {
                info!(
                    "event=store_open module=store status=ok backend=json documents={} other_tables={} duration_ms={}",
                    table.len(),
                    other_tables.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    path,
                    table,
                    other_tables,
                })
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error backend=json duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens the store at [`default_store_path`].
    pub fn open_default() -> StoreResult<Self> {
        Self::open(default_store_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, table: &MemoryStore) -> StoreResult<()> {
        let rows = table
            .documents()
            .iter()
            .map(|(id, contact)| (id.to_string(), contact))
            .collect::<BTreeMap<_, _>>();
        let mut layout = self.other_tables.clone();
        layout.insert(DEFAULT_TABLE.to_string(), serde_json::to_value(rows)?);

        let text = serde_json::to_string_pretty(&layout)?;
        if let Err(err) = fs::write(&self.path, text) {
            error!(
                "event=store_flush module=store status=error backend=json error={}",
                err
            );
            return Err(err.into());
        }
        debug!(
            "event=store_flush module=store status=ok backend=json documents={}",
            table.len()
        );
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn insert(&mut self, contact: &Contact) -> StoreResult<Option<DocId>> {
        let mut staged = self.table.clone();
        let id = staged.insert(contact)?;
        self.write(&staged)?;
        self.table = staged;
        Ok(id)
    }

    fn get(&self, query: &Query) -> StoreResult<Option<StoredDocument>> {
        self.table.get(query)
    }

    fn remove(&mut self, ids: &[DocId]) -> StoreResult<Vec<DocId>> {
        let mut staged = self.table.clone();
        let removed = staged.remove(ids)?;
        if removed.is_empty() {
            return Ok(removed);
        }
        self.write(&staged)?;
        self.table = staged;
        Ok(removed)
    }

    fn all(&self) -> StoreResult<Vec<StoredDocument>> {
        self.table.all()
    }
}

/// Returns `db.json` next to the running executable.
///
/// # Errors
/// - Returns `Io` when the executable path cannot be resolved.
pub fn default_store_path() -> StoreResult<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        StoreError::InvalidData(format!("executable `{}` has no parent directory", exe.display()))
    })?;
    Ok(dir.join(DEFAULT_STORE_FILE))
}

fn load_layout(path: &Path) -> StoreResult<(MemoryStore, FileLayout)> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok((MemoryStore::new(), FileLayout::new()))
        }
        Err(err) => return Err(err.into()),
    };
    if text.trim().is_empty() {
        return Ok((MemoryStore::new(), FileLayout::new()));
    }

    let mut layout: FileLayout = serde_json::from_str(&text)?;
    let rows: BTreeMap<String, Contact> = match layout.remove(DEFAULT_TABLE) {
        Some(value) => serde_json::from_value(value)?,
        None => BTreeMap::new(),
    };
    let mut documents = BTreeMap::new();
    for (key, contact) in rows {
        let id = key.parse::<DocId>().map_err(|_| {
            StoreError::InvalidData(format!("invalid document id `{key}` in table {DEFAULT_TABLE}"))
        })?;
        documents.insert(id, contact);
    }

    Ok((MemoryStore::from_documents(documents), layout))
}
