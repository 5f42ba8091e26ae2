//! Reset command - wipe every account, session and record

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use serde_json::json;

use super::get_context;
use crate::output;

pub fn run(force: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Confirm unless --force
    if !force {
        output::warning("This deletes every account, balance, transaction and contact.");
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let removed = ctx.reset_service.reset_all()?;

    if json {
        return output::json(&json!({ "removed_keys": removed }));
    }
    output::success(&format!("Wallet reset ({} records removed)", removed));
    Ok(())
}
