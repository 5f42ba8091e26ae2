//! DuckDB key-value store implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use duckdb::{params, Connection};

use crate::domain::result::{Error, Result};
use crate::migrations::MIGRATIONS;
use crate::ports::KeyValueStore;
use crate::services::{MigrationResult, MigrationService};

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("could not set lock on file")
}

/// Key-value store backed by the `kv_store` table of a DuckDB file
pub struct DuckDbStore {
    conn: Mutex<Connection>,
}

impl DuckDbStore {
    /// Open (or create) the store at `db_path` and bring its schema up to date
    ///
    /// Another `aw` process holding the file makes opening fail with a lock
    /// error; those are retried with exponential backoff.
    pub fn open(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    let store = Self {
                        conn: Mutex::new(conn),
                    };
                    store.ensure_schema()?;
                    return Ok(store);
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[aw] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::storage(format!("Failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Extension autoloading stays off: the store needs nothing beyond core SQL
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }

    /// Run pending schema migrations
    fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.lock()?;
        MigrationService::new(&conn, MIGRATIONS).run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }
}

impl KeyValueStore for DuckDbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn.query_row(
            "SELECT kv_value FROM kv_store WHERE kv_key = ?",
            [key],
            |row| row.get::<_, String>(0),
        );

        match value {
            Ok(v) => Ok(Some(v)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_store (kv_key, kv_value) VALUES (?, ?)
             ON CONFLICT (kv_key) DO UPDATE SET
                 kv_value = excluded.kv_value,
                 updated_at = current_timestamp",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv_store WHERE kv_key = ?", [key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT kv_key FROM kv_store ORDER BY kv_key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }
}
