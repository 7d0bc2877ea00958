//! Record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable key/value persistence for named JSON text blobs.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writes are last-write-wins; a single synchronous call replaces the
//!   whole value with no partial state observable.
//! - There are no transactions across keys and exactly one writer.
//!
//! # See also
//! - docs/architecture/storage.md

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key of the review collection blob. Versioned for future migration.
pub const REVIEWS_KEY: &str = "shelfnote_reviews_v1";
/// Fixed key of the current-session user blob. Versioned for future migration.
pub const SESSION_KEY: &str = "shelfnote_session_v1";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from record store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "record store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "record store requires table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
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

/// Durable storage of named text records.
///
/// The trait mirrors the narrow surface the original client had against
/// browser local storage: read a key, replace a key, drop a key.
pub trait RecordStore {
    /// Returns the raw stored text for a key, or `None` if never written.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the stored value for a key atomically.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes the stored value; no-op when the key is absent.
    fn clear(&self, key: &str) -> StoreResult<()>;
}

/// SQLite-backed record store over the `records` table.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        if !table_exists(conn, "records")? {
            return Err(StoreError::MissingRequiredTable("records"));
        }
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO records (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            [key, value],
        )?;
        Ok(())
    }

    fn clear(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM records WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
