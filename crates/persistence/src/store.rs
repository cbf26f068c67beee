// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The synchronous key-value store abstraction and its backends.
//!
//! The workflow persists everything through string-keyed get/set/remove with
//! no transactions and no concurrent writers; every value is one serialized
//! collection. `SqliteStore` is the durable backend, `MemoryStore` the test
//! double.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::PersistenceError;

/// A synchronous, string-keyed store.
///
/// Implementations must make `set` a full replace of the previous value and
/// `get` return exactly what was last set. A missing key is `None`, never an
/// error.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying backend fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removes the value stored under `key`. Removing a missing key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying backend fails.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// A SQLite-backed key-value store.
///
/// All state lives in a single two-column table. This mirrors the flat
/// keyspace the workflow was designed against while giving it a durable
/// file-backed home.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (and if necessary initializes) a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(path: &str) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)?;
        Self::bootstrap(conn)
    }

    /// Opens an in-memory store. Used for tests and ephemeral sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )",
            [],
        )?;
        debug!("Initialized key-value table");
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        debug!(key, "Removed key");
        Ok(())
    }
}

/// An in-memory key-value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn exercise_store<S: KeyValueStore>(store: &mut S) {
        assert_eq!(store.get("ideas").unwrap(), None);

        store.set("ideas", "[]").unwrap();
        assert_eq!(store.get("ideas").unwrap().as_deref(), Some("[]"));

        // Set is a full replace.
        store.set("ideas", "[1]").unwrap();
        assert_eq!(store.get("ideas").unwrap().as_deref(), Some("[1]"));

        store.remove("ideas").unwrap();
        assert_eq!(store.get("ideas").unwrap(), None);

        // Removing a missing key is not an error.
        store.remove("ideas").unwrap();
    }

    #[test]
    fn test_memory_store_contract() {
        let mut store = MemoryStore::new();
        exercise_store(&mut store);
    }

    #[test]
    fn test_sqlite_store_contract() {
        let mut store = SqliteStore::in_memory().unwrap();
        exercise_store(&mut store);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.set("ideas", "[1]").unwrap();
        store.set("appeals", "[2]").unwrap();

        store.remove("ideas").unwrap();
        assert_eq!(store.get("appeals").unwrap().as_deref(), Some("[2]"));
    }
}
