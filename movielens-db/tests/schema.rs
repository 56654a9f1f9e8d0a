use movielens_db::schema::{CURRENT_VERSION, create_schema, get_schema_version};
use movielens_db::*;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error or add a second version row
    create_schema(&conn).unwrap();
    let rows: i32 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = ["schema_version", "movies", "ratings", "tags", "links"];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn read_only_requires_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");
    assert!(matches!(open_read_only(&path), Err(SchemaError::Missing(_))));
    assert!(!path.exists());
}

#[test]
fn read_only_rejects_uninitialized_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.db");
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (x INTEGER);")
        .unwrap();
    assert!(matches!(
        open_read_only(&path),
        Err(SchemaError::Uninitialized(_))
    ));
}

#[test]
fn read_only_connection_cannot_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.db");
    drop(open_database(&path).unwrap());

    let conn = open_read_only(&path).unwrap();
    let result = conn.execute(
        "INSERT INTO movies (movie_id, title, genres) VALUES (1, 'x', '')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn open_database_rejects_other_versions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (99)", [])
            .unwrap();
    }
    match open_database(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, 99);
        }
        other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
    }
}
