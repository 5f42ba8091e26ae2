//! Logging service - structured event logging to DuckDB
//!
//! Events land in logs.duckdb next to the wallet store. Only command names,
//! event names and error kinds are recorded: never emails, passwords,
//! amounts, balances or contact details.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::log_migrations::LOG_MIGRATIONS;
use crate::services::MigrationService;

/// Log database file name inside the wallet directory
pub const LOG_DB_FILE: &str = "logs.duckdb";

/// Distinguishes ids generated within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Timestamp in the upper bits, counter in the lower 16
fn generate_id() -> u64 {
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((now_ms().max(0) as u64) << 16) | counter
}

/// Current unix time in milliseconds; 0 if the clock is before the epoch
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// A log event to be recorded
#[derive(Debug, Clone)]
struct LogEvent {
    event: &'static str,
    command: String,
    error_message: Option<String>,
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub command: Option<String>,
    pub error_message: Option<String>,
}

const SELECT_COLUMNS: &str = "SELECT id, timestamp, app_version, platform, event, command, error_message FROM sys_logs";

/// Service for structured event logging
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Open or create logs.duckdb in the wallet directory and migrate it
    pub fn new(wallet_dir: &Path, app_version: impl Into<String>) -> Result<Self> {
        let db_path = wallet_dir.join(LOG_DB_FILE);
        let conn = Connection::open(&db_path)?;
        MigrationService::new(&conn, LOG_MIGRATIONS).run_pending()?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            app_version: app_version.into(),
            platform: detect_platform(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }

    /// Record an event; version and platform are filled in from the service
    fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO sys_logs (
                id, timestamp, app_version, platform,
                event, command, error_message
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            duckdb::params![
                generate_id(),
                now_ms(),
                &self.app_version,
                self.platform,
                event.event,
                &event.command,
                &event.error_message,
            ],
        )?;
        Ok(())
    }

    /// Record a successful CLI command
    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(LogEvent {
            event: "command_executed",
            command: command.to_string(),
            error_message: None,
        })
    }

    /// Record a failed CLI command. Only the error kind is stored, never
    /// the message, which can carry emails or names.
    pub fn log_failure(&self, command: &str, error_kind: &str) -> Result<()> {
        self.log(LogEvent {
            event: "command_failed",
            command: command.to_string(),
            error_message: Some(error_kind.to_string()),
        })
    }

    /// Most recent entries first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(
            &format!("{} ORDER BY timestamp DESC, id DESC LIMIT ?", SELECT_COLUMNS),
            limit,
        )
    }

    /// Most recent entries carrying an error message
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(
            &format!(
                "{} WHERE error_message IS NOT NULL ORDER BY timestamp DESC, id DESC LIMIT ?",
                SELECT_COLUMNS
            ),
            limit,
        )
    }

    fn query(&self, sql: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let entries = stmt
            .query_map([limit as i64], |row| {
                Ok(LogEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    app_version: row.get(2)?,
                    platform: row.get(3)?,
                    event: row.get(4)?,
                    command: row.get(5)?,
                    error_message: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of entries carrying an error message
    pub fn count_errors(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM sys_logs WHERE error_message IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Delete entries older than `timestamp_ms` (unix ms)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logging_service_creation() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "0.1.0").unwrap();
        assert!(service.db_path().exists());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_log_command() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "0.1.0").unwrap();

        service.log_command("deposit").unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "command_executed");
        assert_eq!(entries[0].command.as_deref(), Some("deposit"));
        assert_eq!(entries[0].app_version, "0.1.0");
        assert!(entries[0].error_message.is_none());
    }

    #[test]
    fn test_log_failure_stores_kind() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "0.1.0").unwrap();

        service.log_command("status").unwrap();
        service.log_failure("withdraw", "insufficient_funds").unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "command_failed");
        assert_eq!(errors[0].command.as_deref(), Some("withdraw"));
        assert_eq!(errors[0].error_message.as_deref(), Some("insufficient_funds"));
    }

    #[test]
    fn test_count_errors_is_not_capped_by_page_size() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "0.1.0").unwrap();

        for _ in 0..1005 {
            service.log_failure("deposit", "validation").unwrap();
        }
        service.log_command("balance").unwrap();

        assert_eq!(service.get_errors(1000).unwrap().len(), 1000);
        assert_eq!(service.count_errors().unwrap(), 1005);
        assert_eq!(service.count().unwrap(), 1006);
    }

    #[test]
    fn test_count_and_delete() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "0.1.0").unwrap();

        service.log_command("balance").unwrap();
        service.log_command("status").unwrap();
        assert_eq!(service.count().unwrap(), 2);

        assert_eq!(service.delete_before(now_ms() + 1000).unwrap(), 2);
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_reopen_keeps_entries() {
        let dir = tempdir().unwrap();
        {
            let service = LoggingService::new(dir.path(), "0.1.0").unwrap();
            service.log_command("status").unwrap();
        }
        let service = LoggingService::new(dir.path(), "0.1.0").unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }
}
