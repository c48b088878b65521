//! SQLite-backed document store.
//!
//! # Responsibility
//! - Map the document store contract onto the `contacts` table.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - Store-native order is ascending `id`, which equals insertion order.
//! - Query fields are bound as parameters; column names come from a closed
//!   whitelist.

use super::{DocId, DocumentStore, Query, StoreError, StoreResult, StoredDocument};
use crate::db::{open_db, open_db_in_memory};
use crate::model::contact::Contact;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::Path;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    phone_number,
    address
FROM contacts";

/// Contact collection stored in a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wraps a connection previously prepared by [`open_db`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl DocumentStore for SqliteStore {
    fn insert(&mut self, contact: &Contact) -> StoreResult<Option<DocId>> {
        let changed = self.conn.execute(
            "INSERT INTO contacts (
                first_name,
                last_name,
                phone_number,
                address
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.phone_number.as_str(),
                contact.address.as_str(),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(id_from_db(self.conn.last_insert_rowid())?))
    }

    fn get(&self, query: &Query) -> StoreResult<Option<StoredDocument>> {
        let mut sql = format!("{CONTACT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        for (field, value) in query.conditions() {
            sql.push_str(&format!(" AND {} = ?", field.name()));
            bind_values.push(Value::Text(value.clone()));
        }
        sql.push_str(" ORDER BY id ASC LIMIT 1;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn remove(&mut self, ids: &[DocId]) -> StoreResult<Vec<DocId>> {
        let tx = self.conn.transaction()?;
        let mut removed = Vec::new();
        for id in ids {
            let changed = tx.execute("DELETE FROM contacts WHERE id = ?1;", [id_to_db(*id)?])?;
            if changed > 0 {
                removed.push(*id);
            }
        }
        tx.commit()?;

        Ok(removed)
    }

    fn all(&self) -> StoreResult<Vec<StoredDocument>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(parse_contact_row(row)?);
        }

        Ok(documents)
    }
}

fn parse_contact_row(row: &Row<'_>) -> StoreResult<StoredDocument> {
    let id = id_from_db(row.get("id")?)?;
    let contact = Contact {
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone_number: row.get("phone_number")?,
        address: row.get("address")?,
    };
    Ok(StoredDocument::new(id, contact))
}

fn id_from_db(value: i64) -> StoreResult<DocId> {
    DocId::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid id value `{value}` in contacts.id")))
}

fn id_to_db(id: DocId) -> StoreResult<i64> {
    i64::try_from(id)
        .map_err(|_| StoreError::InvalidData(format!("document id `{id}` exceeds SQLite range")))
}
