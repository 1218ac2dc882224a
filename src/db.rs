use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const DB_FILE: &str = "tfsa.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    account_key TEXT NOT NULL,
    date TEXT NOT NULL,
    institution TEXT NOT NULL DEFAULT '',
    amount REAL NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_key);

CREATE TABLE IF NOT EXISTS account_settings (
    account_key TEXT PRIMARY KEY,
    start_year INTEGER NOT NULL,
    updated_at TEXT DEFAULT (datetime('now'))
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    // WAL keeps readers on a consistent snapshot while another process writes.
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Open the database under `data_dir`, creating the schema if needed.
pub fn open(data_dir: &Path) -> Result<Connection> {
    let path = data_dir.join(DB_FILE);
    tracing::debug!(path = %path.display(), "opening database");
    let conn = get_connection(&path)?;
    init_db(&conn)?;
    Ok(conn)
}

#[cfg(test)]
pub(crate) fn test_db() -> (tempfile::TempDir, Connection) {
    let dir = tempfile::tempdir().unwrap();
    let conn = get_connection(&dir.path().join("test.db")).unwrap();
    init_db(&conn).unwrap();
    (dir, conn)
}
