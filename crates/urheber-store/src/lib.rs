//! Urheber Storage Layer
//!
//! Implements the `DomainStore` trait on SQLite.
//!
//! # Matching
//!
//! `find_records` matches the query string as a case-insensitive substring
//! of the stored domain (`instr(lower(domain), lower(?))`), so `%` and `_`
//! carry no wildcard meaning. Case folding is ASCII-only, as in SQLite's
//! built-in `lower()`. Results are ordered by record id, i.e. insertion
//! order, which makes the first match deterministic.
//!
//! # Examples
//!
//! ```no_run
//! use urheber_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! store.insert_record("example.org", "Unternehmen").unwrap();
//! ```

#![warn(missing_docs)]

use rusqlite::{Connection, OpenFlags, ToSql};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;
use urheber_domain::traits::{DomainQuery, DomainStore};
use urheber_domain::DomainRecord;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A previous holder of the connection panicked
    #[error("Connection lock poisoned")]
    LockPoisoned,
}

/// SQLite-based implementation of DomainStore
///
/// # Thread Safety
///
/// The connection sits behind a mutex, so one store can be shared by
/// concurrent resolver calls. Queries are serialized on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an existing store without creating or modifying it
    ///
    /// Fails if the database file does not exist.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.connection()?.execute_batch(schema)?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Record a classification for a domain, returning the new record id
    ///
    /// Existing records for the same domain are left untouched.
    pub fn insert_record(&self, domain: &str, urheber: &str) -> Result<i64, StoreError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(StoreError::InvalidData("domain must not be empty".to_string()));
        }

        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO domains (domain, urheber) VALUES (?1, ?2)",
            (domain, urheber),
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .connection()?
            .query_row("SELECT COUNT(*) FROM domains", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|e| StoreError::InvalidData(e.to_string()))
    }
}

impl DomainStore for SqliteStore {
    type Error = StoreError;

    fn find_records(&self, query: &DomainQuery) -> Result<Vec<DomainRecord>, Self::Error> {
        let mut sql = String::from(
            "SELECT id, domain, urheber FROM domains WHERE instr(lower(domain), lower(?)) > 0",
        );
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(query.domain_contains.clone())];

        if query.require_urheber {
            sql.push_str(" AND urheber IS NOT NULL AND trim(urheber) <> ''");
        }

        if let Some(after_id) = query.after_id {
            sql.push_str(" AND id > ?");
            params.push(Box::new(after_id));
        }

        sql.push_str(" ORDER BY id");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let records = stmt
            .query_map(&param_refs[..], |row| {
                let urheber: Option<String> = row.get(2)?;
                Ok(DomainRecord {
                    id: row.get(0)?,
                    domain: row.get(1)?,
                    urheber: urheber.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Domain query '{}' matched {} record(s)",
            query.domain_contains,
            records.len()
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_increasing_ids() {
        let store = SqliteStore::new(":memory:").unwrap();
        let first = store.insert_record("example.org", "Unternehmen").unwrap();
        let second = store.insert_record("example.com", "staatlich").unwrap();
        assert!(second > first);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_insert_rejects_empty_domain() {
        let store = SqliteStore::new(":memory:").unwrap();
        let result = store.insert_record("  ", "Unternehmen");
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_read_only_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.db");

        assert!(SqliteStore::open_read_only(&path).is_err());
        assert!(!path.exists());

        SqliteStore::new(&path)
            .unwrap()
            .insert_record("example.org", "Unternehmen")
            .unwrap();

        let store = SqliteStore::open_read_only(&path).unwrap();
        let records = store
            .find_records(&DomainQuery::classified("example.org"))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert!(store.insert_record("example.com", "staatlich").is_err());
    }

    #[test]
    fn test_wildcards_are_literal() {
        let store = SqliteStore::new(":memory:").unwrap();
        store.insert_record("example.org", "Unternehmen").unwrap();

        let records = store
            .find_records(&DomainQuery::classified("exam%le"))
            .unwrap();
        assert!(records.is_empty());

        let records = store.find_records(&DomainQuery::classified("ex_mple")).unwrap();
        assert!(records.is_empty());
    }
}
