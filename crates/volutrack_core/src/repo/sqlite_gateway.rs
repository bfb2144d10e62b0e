//! SQLite-backed key-value gateway.
//!
//! # Invariants
//! - Values live in the `kv_store` table created by migration 1.
//! - `save` is an upsert; `updated_at` tracks the last write.

use crate::repo::gateway::{GatewayResult, PersistenceGateway};
use rusqlite::{params, Connection, OptionalExtension};

/// Gateway over a migrated connection (see `db::open_db`).
pub struct SqliteKvGateway<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvGateway<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Deletes one key; returns whether a row existed.
    pub fn remove(&self, key: &str) -> GatewayResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> GatewayResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_store ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl PersistenceGateway for SqliteKvGateway<'_> {
    fn load(&self, key: &str) -> GatewayResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> GatewayResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvGateway;
    use crate::db::open_db_in_memory;
    use crate::repo::gateway::PersistenceGateway;

    #[test]
    fn save_upserts_and_load_reads_back() {
        let conn = open_db_in_memory().unwrap();
        let gateway = SqliteKvGateway::new(&conn);

        assert_eq!(gateway.load("volutrack_guests").unwrap(), None);
        gateway.save("volutrack_guests", "[]").unwrap();
        gateway.save("volutrack_guests", "[1]").unwrap();

        assert_eq!(
            gateway.load("volutrack_guests").unwrap().as_deref(),
            Some("[1]")
        );
        assert_eq!(gateway.keys().unwrap(), vec!["volutrack_guests"]);
    }

    #[test]
    fn remove_reports_whether_key_existed() {
        let conn = open_db_in_memory().unwrap();
        let gateway = SqliteKvGateway::new(&conn);
        gateway.save("a", "1").unwrap();

        assert!(gateway.remove("a").unwrap());
        assert!(!gateway.remove("a").unwrap());
        assert_eq!(gateway.load("a").unwrap(), None);
    }
}
