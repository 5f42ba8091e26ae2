//! Doctor command - check stored records for damage

use anyhow::{bail, Result};
use colored::Colorize;
use comfy_table::{Cell, Color};
use serde_json::Value;
use wallet_core::services::CheckStatus;

use super::get_context;
use crate::output;

/// Format a detail JSON value as "key: value, key: value"
fn format_detail(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}: {}", k, s),
                _ => format!("{}: {}", k, v),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

pub fn run(verbose: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.doctor_service.run_checks()?;

    if json {
        output::json(&result)?;
    } else {
        println!("{}", "Wallet Health Check".bold());
        println!();

        let mut table = output::create_table();
        table.set_header(vec!["Check", "Status", "Message"]);

        for (check_name, check) in &result.checks {
            let status_cell = match check.status {
                CheckStatus::Pass => Cell::new("PASS").fg(Color::Green),
                CheckStatus::Warning => Cell::new("WARN").fg(Color::Yellow),
                CheckStatus::Error => Cell::new("ERROR").fg(Color::Red),
            };
            table.add_row(vec![Cell::new(check_name), status_cell, Cell::new(&check.message)]);

            if verbose {
                for detail in check.details.iter().flatten() {
                    table.add_row(vec![
                        Cell::new(""),
                        Cell::new(""),
                        Cell::new(format!("  - {}", format_detail(detail))),
                    ]);
                }
            }
        }

        println!("{}", table);
        println!();
        println!(
            "Summary: {} passed, {} warnings, {} errors",
            result.summary.passed.to_string().green(),
            result.summary.warnings.to_string().yellow(),
            result.summary.errors.to_string().red(),
        );
    }

    if result.summary.errors > 0 {
        bail!("{} check(s) failed", result.summary.errors);
    }
    Ok(())
}
