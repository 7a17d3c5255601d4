//! SQLite knowledge store.
//!
//! An alternative source for the catalog and rule set: JSON data is imported
//! once, then loaded from the database on later runs.

mod knowledge;
mod schema;

pub use knowledge::*;
pub use schema::*;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Open an existing database read-only, for loading.
    ///
    /// Never creates a file: a missing path is `DbError::NotFound`.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DbError::NotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"drugs".to_string()));
        assert!(tables.contains(&"interactions".to_string()));
        assert!(tables.contains(&"interaction_drugs".to_string()));
    }

    #[test]
    fn test_open_existing_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.db");

        assert!(matches!(
            Database::open_existing(&path),
            Err(DbError::NotFound(p)) if p == path
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_existing_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zhiyao.db");
        Database::open(&path).unwrap();

        let db = Database::open_existing(&path).unwrap();
        let result = db
            .conn()
            .execute("INSERT INTO drugs (id, name) VALUES ('A', 'Aspirin')", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_reopen_keeps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zhiyao.db");

        Database::open(&path).unwrap();
        // Schema statements are idempotent
        assert!(Database::open(&path).is_ok());
    }
}
