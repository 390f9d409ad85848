//! SQLite-backed key/value persistence.
//!
//! All tracker state lives in one `kv` table keyed by string. Grouped
//! writes run inside a transaction so a tracker's record is never
//! partially persisted.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, KvStore};
use crate::error::StorageError;

/// SQLite database holding the per-installation key/value state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/nutrify/nutrify.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("nutrify.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )?;
            for (key, value) in entries {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let db = Database::open_memory().unwrap();
        assert!(db.get("absent").unwrap().is_none());
    }

    #[test]
    fn test_put_many_round_trip() {
        let db = Database::open_memory().unwrap();
        db.put_many(&[
            ("dietStreak", "3".to_string()),
            ("dietDataDay", "2025-06-21".to_string()),
        ])
        .unwrap();

        assert_eq!(db.get("dietStreak").unwrap().as_deref(), Some("3"));
        assert_eq!(db.get("dietDataDay").unwrap().as_deref(), Some("2025-06-21"));
    }

    #[test]
    fn test_put_many_overwrites() {
        let db = Database::open_memory().unwrap();
        db.put_many(&[("todayProtein", "6".to_string())]).unwrap();
        db.put_many(&[("todayProtein", "12".to_string())]).unwrap();
        assert_eq!(db.get("todayProtein").unwrap().as_deref(), Some("12"));
    }

    #[test]
    fn test_open_at_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nutrify.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.put_many(&[("exerciseStreak", "5".to_string())]).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("exerciseStreak").unwrap().as_deref(), Some("5"));
    }
}
