//! SQLite-backed key-value store.
//!
//! One table, two payload kinds: JSON values (primitives and structured
//! data) and opaque byte blobs. A key holds exactly one payload; writing
//! replaces whatever was there, regardless of kind.

use crate::error::StoreResult;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

const KIND_JSON: &str = "json";
const KIND_BLOB: &str = "blob";

/// A durable key-value store for JSON primitives and opaque blobs.
///
/// Values persist across reopens of the same path until removed or
/// cleared. The handle is cheap to clone and safe to share; writes are
/// serialized through an internal lock.
#[derive(Clone)]
pub struct KvStore {
    conn: Arc<Mutex<Connection>>,
}

impl KvStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        debug!(path = %path.display(), "key-value store opened");
        Ok(store)
    }

    /// Opens an in-memory store (for tests and throwaway state).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                payload BLOB NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    // ── JSON values ──────────────────────────────────────────────

    /// Stores a JSON value under `key`, replacing any previous payload.
    pub fn set_value(&self, key: &str, value: &Value) -> StoreResult<()> {
        let payload = serde_json::to_vec(value)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, kind, payload) VALUES (?1, ?2, ?3)",
            params![key, KIND_JSON, payload],
        )?;
        Ok(())
    }

    /// Reads the JSON value stored under `key`.
    ///
    /// Returns `None` when the key is absent or holds a blob payload.
    pub fn get_value(&self, key: &str) -> StoreResult<Option<Value>> {
        match self.get_payload(key, KIND_JSON)? {
            Some(payload) => Ok(Some(serde_json::from_slice(&payload)?)),
            None => Ok(None),
        }
    }

    /// Stores a string under `key`.
    pub fn set_string(&self, key: &str, value: &str) -> StoreResult<()> {
        self.set_value(key, &Value::String(value.to_string()))
    }

    /// Reads a string; `None` when absent or not a string.
    pub fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self
            .get_value(key)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Stores an integer under `key`.
    pub fn set_i64(&self, key: &str, value: i64) -> StoreResult<()> {
        self.set_value(key, &Value::from(value))
    }

    /// Reads an integer; `None` when absent or not an integer.
    pub fn get_i64(&self, key: &str) -> StoreResult<Option<i64>> {
        Ok(self.get_value(key)?.and_then(|v| v.as_i64()))
    }

    /// Stores a float under `key`.
    pub fn set_f64(&self, key: &str, value: f64) -> StoreResult<()> {
        self.set_value(key, &Value::from(value))
    }

    /// Reads a float; `None` when absent or not numeric.
    pub fn get_f64(&self, key: &str) -> StoreResult<Option<f64>> {
        Ok(self.get_value(key)?.and_then(|v| v.as_f64()))
    }

    /// Stores a boolean under `key`.
    pub fn set_bool(&self, key: &str, value: bool) -> StoreResult<()> {
        self.set_value(key, &Value::Bool(value))
    }

    /// Reads a boolean; `None` when absent or not a boolean.
    pub fn get_bool(&self, key: &str) -> StoreResult<Option<bool>> {
        Ok(self.get_value(key)?.and_then(|v| v.as_bool()))
    }

    // ── Blobs ────────────────────────────────────────────────────

    /// Stores an opaque byte blob under `key`, replacing any previous payload.
    pub fn set_blob(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, kind, payload) VALUES (?1, ?2, ?3)",
            params![key, KIND_BLOB, bytes],
        )?;
        Ok(())
    }

    /// Reads the blob stored under `key`.
    ///
    /// Returns `None` when the key is absent or holds a JSON payload.
    pub fn get_blob(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.get_payload(key, KIND_BLOB)
    }

    // ── Maintenance ──────────────────────────────────────────────

    /// Removes `key`. Returns true if a payload was present.
    pub fn remove(&self, key: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    /// Removes every key.
    pub fn clear(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM kv", [])?;
        debug!("key-value store cleared");
        Ok(())
    }

    /// Returns true if `key` holds any payload.
    pub fn contains(&self, key: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Number of stored keys.
    pub fn len(&self) -> StoreResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn get_payload(&self, key: &str, kind: &str) -> StoreResult<Option<Vec<u8>>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT payload FROM kv WHERE key = ?1 AND kind = ?2",
                params![key, kind],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(row)
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").finish_non_exhaustive()
    }
}
