//! SQLite connection provider.

use crate::error::AppResult;
use crate::infra::migrate::migrate;
use crate::infra::paths::{db_path, DEFAULT_DB_FILENAME};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// The canonical filename resolves under `root/data/`; anything else is used verbatim.
pub fn resolve_db_target(root: &Path, target: &str) -> AppResult<PathBuf> {
    if target == DEFAULT_DB_FILENAME {
        db_path(root, DEFAULT_DB_FILENAME)
    } else {
        Ok(PathBuf::from(target))
    }
}

/// Open a connection. Schema is left untouched.
pub fn open_connection(root: &Path, target: &str) -> AppResult<Connection> {
    let path = resolve_db_target(root, target)?;
    log::debug!("opening {:?}", path);
    Ok(Connection::open(path)?)
}

/// Initialize DB at path, run migrations, return the live connection.
pub fn init_db(db_path: &Path) -> AppResult<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut conn = Connection::open(db_path)?;
    migrate(&mut conn)?;
    Ok(conn)
}

/// In-memory migrated database for tests.
pub fn init_test_db() -> Connection {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    migrate(&mut conn).expect("migrate test db");
    conn
}
