//! Database persistence layer for airledger
//!
//! SQLite-backed [`WorldState`] implementation. Records live in a single
//! `world_state` table keyed by TEXT primary key, which gives the
//! lexicographic ordering the range scans rely on.

use rusqlite::{params, Connection};
use std::sync::Mutex;

use crate::error::{LedgerError, Result};
use crate::store::{WorldState, WriteBatch, WriteOp};

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| LedgerError::Store(format!("Failed to open database: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS world_state (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )",
            [],
        )
        .map_err(|e| LedgerError::Store(format!("Failed to create world_state table: {}", e)))?;

        Ok(Database { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LedgerError::Store("Mutex poisoned".to_string()))
    }
}

impl WorldState for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT value FROM world_state WHERE key = ?1")
            .map_err(|e| LedgerError::Store(format!("Failed to prepare query: {}", e)))?;

        let mut rows = stmt
            .query(params![key])
            .map_err(|e| LedgerError::Store(format!("Failed to query key: {}", e)))?;

        match rows
            .next()
            .map_err(|e| LedgerError::Store(format!("Failed to read row: {}", e)))?
        {
            Some(row) => {
                let value: Vec<u8> = row
                    .get(0)
                    .map_err(|e| LedgerError::Store(format!("Failed to read value: {}", e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO world_state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| LedgerError::Store(format!("Failed to put key: {}", e)))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM world_state WHERE key = ?1", params![key])
            .map_err(|e| LedgerError::Store(format!("Failed to delete key: {}", e)))?;
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let conn = self.lock()?;

        // An empty end bound leaves the range open on the right
        let mut stmt = if end.is_empty() {
            conn.prepare("SELECT key, value FROM world_state WHERE key >= ?1 ORDER BY key ASC")
        } else {
            conn.prepare(
                "SELECT key, value FROM world_state WHERE key >= ?1 AND key < ?2 ORDER BY key ASC",
            )
        }
        .map_err(|e| LedgerError::Store(format!("Failed to prepare range query: {}", e)))?;

        fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, Vec<u8>)> {
            Ok((row.get(0)?, row.get(1)?))
        }
        let rows = if end.is_empty() {
            stmt.query_map(params![start], map_row)
        } else {
            stmt.query_map(params![start, end], map_row)
        }
        .map_err(|e| LedgerError::Store(format!("Failed to run range query: {}", e)))?;

        let mut pairs = Vec::new();
        for row_result in rows {
            pairs.push(
                row_result.map_err(|e| LedgerError::Store(format!("Failed to read row: {}", e)))?,
            );
        }
        Ok(pairs)
    }

    fn apply(&self, batch: WriteBatch) -> Result<()> {
        let conn = self.lock()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| LedgerError::Store(format!("Failed to start transaction: {}", e)))?;

        for op in &batch.ops {
            match op {
                WriteOp::Put { key, value } => {
                    tx.execute(
                        "INSERT OR REPLACE INTO world_state (key, value) VALUES (?1, ?2)",
                        params![key, value],
                    )
                    .map_err(|e| LedgerError::Store(format!("Failed to put key: {}", e)))?;
                }
                WriteOp::Delete { key } => {
                    tx.execute("DELETE FROM world_state WHERE key = ?1", params![key])
                        .map_err(|e| LedgerError::Store(format!("Failed to delete key: {}", e)))?;
                }
            }
        }

        tx.commit()
            .map_err(|e| LedgerError::Store(format!("Failed to commit transaction: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_open() {
        let db = Database::open(":memory:").unwrap();
        assert!(db.conn.lock().unwrap().is_autocommit());
    }

    #[test]
    fn test_range_scan_key_order() {
        let db = Database::open(":memory:").unwrap();
        db.put("TXN_111-CREATE-1", b"c").unwrap();
        db.put("111", b"a").unwrap();
        db.put("222", b"b").unwrap();

        let all = db.range_scan("", "").unwrap();
        let keys: Vec<_> = all.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["111", "222", "TXN_111-CREATE-1"]);

        let scoped = db.range_scan("TXN_111-", "TXN_111~").unwrap();
        assert_eq!(scoped.len(), 1);
    }

    #[test]
    fn test_apply_batch_is_atomic_per_commit() {
        let db = Database::open(":memory:").unwrap();

        let mut batch = WriteBatch::new();
        batch.put("a", b"1".to_vec());
        batch.put("b", b"2".to_vec());
        db.apply(batch).unwrap();

        assert_eq!(db.get("a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(db.get("b").unwrap(), Some(b"2".to_vec()));

        let mut batch = WriteBatch::new();
        batch.delete("a");
        batch.delete("b");
        db.apply(batch).unwrap();
        assert_eq!(db.get("a").unwrap(), None);
        assert_eq!(db.get("b").unwrap(), None);
    }
}
