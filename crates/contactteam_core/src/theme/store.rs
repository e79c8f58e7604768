//! Preference key-value storage backends.
//!
//! # Invariants
//! - The SQLite file carries `PRAGMA user_version = 1` once the
//!   `preferences` table exists; a newer version is refused untouched.

use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{Duration, Instant};

/// Layout version of the `preferences` table written by this build.
pub const PREFERENCE_SCHEMA_VERSION: u32 = 1;

const CREATE_PREFERENCES: &str = "CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
);";

pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Storage failure for preference reads/writes.
#[derive(Debug)]
pub enum PreferenceError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with a different table layout.
    NewerSchema { found: u32 },
    /// Backend refused the operation (read-only medium, quota, ...).
    Unavailable(String),
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::NewerSchema { found } => write!(
                f,
                "preference store schema version {found} is newer than supported \
                 {PREFERENCE_SCHEMA_VERSION}"
            ),
            Self::Unavailable(message) => write!(f, "preference store unavailable: {message}"),
        }
    }
}

impl Error for PreferenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NewerSchema { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for PreferenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Local string key-value storage for UI preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PreferenceResult<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed preference store (`preferences` table).
pub struct SqlitePreferenceStore {
    conn: Connection,
}

impl SqlitePreferenceStore {
    /// Opens (or creates) the store file and ensures the table exists.
    ///
    /// # Side effects
    /// - Creates the file when missing.
    /// - Emits `preference_store_open` events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> PreferenceResult<Self> {
        open_with("file", || Connection::open(path))
    }

    pub fn open_in_memory() -> PreferenceResult<Self> {
        open_with("memory", Connection::open_in_memory)
    }

    /// Schema version currently recorded in the backing file.
    pub fn schema_version(&self) -> PreferenceResult<u32> {
        Ok(user_version(&self.conn)?)
    }
}

fn open_with<F>(mode: &str, open: F) -> PreferenceResult<SqlitePreferenceStore>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    let result = open()
        .map_err(PreferenceError::from)
        .and_then(|conn| prepare(&conn).map(|()| conn));

    match result {
        Ok(conn) => {
            info!(
                "event=preference_store_open module=theme status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(SqlitePreferenceStore { conn })
        }
        Err(err) => {
            error!(
                "event=preference_store_open module=theme status=error mode={mode} \
                 duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn prepare(conn: &Connection) -> PreferenceResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    let found = user_version(conn)?;
    if found > PREFERENCE_SCHEMA_VERSION {
        return Err(PreferenceError::NewerSchema { found });
    }
    if found < PREFERENCE_SCHEMA_VERSION {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(CREATE_PREFERENCES)?;
        tx.pragma_update(None, "user_version", PREFERENCE_SCHEMA_VERSION)?;
        tx.commit()?;
    }
    Ok(())
}

fn user_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.values.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
