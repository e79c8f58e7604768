use contactteam_core::{
    PreferenceError, PreferenceStore, RootModeFlag, SqlitePreferenceStore, ThemeContext,
    ThemeSource, DARK_MODE_KEY, PREFERENCE_SCHEMA_VERSION,
};
use rusqlite::Connection;

#[test]
fn toggle_survives_reload_and_overrides_system_preference() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contactteam.sqlite3");

    {
        let store = SqlitePreferenceStore::open(&path).unwrap();
        let mut theme = ThemeContext::load(store, RootModeFlag::default(), &|| Some(false));
        assert!(!theme.is_dark());
        assert_eq!(theme.source(), ThemeSource::System);

        let previous = theme.is_dark();
        assert_eq!(theme.toggle().unwrap(), !previous);
        assert_eq!(theme.is_dark(), !previous);
    }

    let store = SqlitePreferenceStore::open(&path).unwrap();
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

    let theme = ThemeContext::load(store, RootModeFlag::default(), &|| Some(false));
    assert!(theme.is_dark());
    assert_eq!(theme.source(), ThemeSource::Persisted);
    assert!(theme.marker().is_set());
}

#[test]
fn persisted_false_is_stored_as_literal_string() {
    let store = SqlitePreferenceStore::open_in_memory().unwrap();
    store.set(DARK_MODE_KEY, "true").unwrap();

    let mut theme = ThemeContext::load(&store, RootModeFlag::default(), &|| None);
    assert!(theme.is_dark());
    assert!(!theme.toggle().unwrap());
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
}

#[test]
fn reopening_store_keeps_table_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.sqlite3");

    let first = SqlitePreferenceStore::open(&path).unwrap();
    first.set(DARK_MODE_KEY, "true").unwrap();
    assert_eq!(first.schema_version().unwrap(), PREFERENCE_SCHEMA_VERSION);
    drop(first);

    let second = SqlitePreferenceStore::open(&path).unwrap();
    assert_eq!(second.schema_version().unwrap(), PREFERENCE_SCHEMA_VERSION);
    assert_eq!(second.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

    let conn = Connection::open(&path).unwrap();
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master \
             WHERE type = 'table' AND name = 'preferences');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match SqlitePreferenceStore::open(&path) {
        Err(PreferenceError::NewerSchema { found }) => assert_eq!(found, 999),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("future schema must be rejected"),
    }

    let conn = Connection::open(&path).unwrap();
    let tables: i64 = conn
        .query_row("SELECT COUNT(*) FROM sqlite_master;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tables, 0);
}
