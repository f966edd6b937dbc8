//! SQLite-backed key-value store.
//!
//! Values live in a single `kv_store` table inside a SQLite file. Connections
//! come from an r2d2 pool so the store can be shared across components, and
//! [`KeyValueStore::set_many`] runs inside one transaction, which makes an
//! entry list and its audio reference land together.
//!
//! # Example
//!
//! ```no_run
//! use wellspring::store::{KeyValueStore, SqliteStore};
//! use std::path::Path;
//!
//! let store = SqliteStore::open(Path::new("/tmp/wellspring.db"))?;
//! store.initialize_schema()?;
//! store.set("mood_entries", "[]")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::KeyValueStore;
use crate::errors::StoreError;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Store handle with connection pooling.
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    /// Opens or creates the store file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or is not a SQLite database
    /// - The connection pool cannot be initialized
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        debug!("Opening store at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(4)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)?;

        // Touch the file so a bad database fails here rather than on first use
        let conn = pool.get()?;
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))?;
        drop(conn);

        info!("Store opened successfully");
        Ok(SqliteStore { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The pool is limited to one connection because every new in-memory
    /// connection would otherwise see its own empty database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;
        Ok(SqliteStore { pool })
    }

    /// Gets a connection from the pool.
    pub fn get_conn(&self) -> Result<PooledConnection, StoreError> {
        Ok(self.pool.get()?)
    }

    /// Creates the table if it does not exist.
    ///
    /// Idempotent and safe to call on every launch.
    pub fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.get_conn()?;
        create_tables(&conn)?;
        info!("Store schema initialized");
        Ok(())
    }
}

fn create_tables(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

const UPSERT_SQL: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = CURRENT_TIMESTAMP
"#;

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("Writing {} bytes under key {}", value.len(), key);
        let conn = self.get_conn()?;
        conn.execute(UPSERT_SQL, params![key, value])?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.get_conn()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        for (key, value) in pairs {
            tx.execute(UPSERT_SQL, params![key, value])?;
        }
        tx.commit()?;
        debug!("Committed batch of {} keys", pairs.len());
        Ok(())
    }
}

/// Connection customizer applying per-connection pragmas.
#[derive(Debug)]
struct SqlitePragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}
