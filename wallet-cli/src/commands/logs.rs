//! Logs command - view and manage the event log

use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use serde_json::json;
use wallet_core::services::logging::now_ms;
use wallet_core::services::LoggingService;

use super::get_wallet_dir;
use crate::output;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_logging_service() -> Result<LoggingService> {
    let wallet_dir = get_wallet_dir()?;
    std::fs::create_dir_all(&wallet_dir)?;
    Ok(LoggingService::new(&wallet_dir, env!("CARGO_PKG_VERSION"))?)
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Reuses the logger `main` already opened; logs.duckdb is opened once per process
pub fn run(command: LogsCommands, logger: Option<&LoggingService>) -> Result<()> {
    let opened;
    let service = match logger {
        Some(l) => l,
        None => {
            opened = get_logging_service()?;
            &opened
        }
    };

    match command {
        LogsCommands::List { limit, errors, json } => {
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                return output::json(&entries);
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Time", "Event", "Command", "Error"]);
            for entry in entries {
                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event,
                    entry.command.unwrap_or_default(),
                    entry.error_message.unwrap_or_default(),
                ]);
            }
            println!("{}", table);
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let days = i64::try_from(older_than_days).unwrap_or(i64::MAX / DAY_MS);
            let cutoff_ms = now_ms().saturating_sub(days.saturating_mul(DAY_MS));

            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete logs older than {} days?", older_than_days))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = service.delete_before(cutoff_ms)?;

            if json {
                return output::json(&json!({ "deleted": deleted }));
            }
            println!("Deleted {} log entries", deleted);
        }
        LogsCommands::Stats { json } => {
            let total = service.count()?;
            let errors = service.count_errors()?;
            let db_path = service.db_path().to_path_buf();
            let size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                return output::json(&json!({
                    "total_entries": total,
                    "error_count": errors,
                    "database_path": db_path.to_string_lossy(),
                    "database_size_bytes": size_bytes,
                }));
            }

            println!("{}", "Log Statistics".bold());
            println!("  Total entries: {}", total);
            println!("  Errors: {}", errors);
            println!("  Database: {}", db_path.display());
            println!("  Size: {} bytes", size_bytes);
        }
    }

    Ok(())
}
