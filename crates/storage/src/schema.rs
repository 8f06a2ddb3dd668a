use std::time::Duration;

use rusqlite::Connection;

use crate::error::StorageError;

pub const SCHEMA_VERSION: i32 = 1;

pub fn init_schema(conn: &Connection, busy_timeout: Duration) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, unixepoch())",
        [SCHEMA_VERSION],
    )?;
    Ok(())
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    rowid INTEGER PRIMARY KEY,
    product_id BLOB NOT NULL UNIQUE CHECK (length(product_id) = 16),
    name TEXT NOT NULL UNIQUE CHECK (length(name) BETWEEN 1 AND 100),
    category TEXT NOT NULL CHECK (length(category) > 0),
    quantity INTEGER NOT NULL CHECK (quantity >= 0)
);
CREATE INDEX IF NOT EXISTS idx_products_name_nocase ON products (name COLLATE NOCASE);
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_records_schema_version_once() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn, Duration::from_millis(100)).unwrap();
        init_schema(&conn, Duration::from_millis(100)).unwrap();

        let versions: Vec<i32> = conn
            .prepare("SELECT version FROM schema_version")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(versions, vec![SCHEMA_VERSION]);
    }
}
