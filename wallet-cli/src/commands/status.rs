//! Status command - who is logged in, the balance, and what can be done next

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use super::{get_session, money};
use crate::output;

const MENU: &[(&str, &str)] = &[
    ("aw deposit", "Add money to the wallet"),
    ("aw withdraw", "Take money out"),
    ("aw send", "Transfer to a saved contact"),
    ("aw receive", "Record money received"),
    ("aw contacts", "Manage saved contacts"),
    ("aw transactions", "Transaction history"),
    ("aw logout", "End the session"),
];

pub fn run(json: bool) -> Result<()> {
    let (ctx, session) = get_session()?;

    let name = ctx
        .account_service
        .find_user(session.email())?
        .map(|u| u.name)
        .unwrap_or_else(|| session.email().to_string());
    let balance = ctx.ledger_service.balance(&session)?;
    let transactions = ctx.ledger_service.transactions(&session, None)?.len();
    let contacts = ctx.contact_service.list_contacts(&session)?.len();

    if json {
        return output::json(&json!({
            "name": name,
            "email": session.email(),
            "balance": balance,
            "transactions": transactions,
            "contacts": contacts,
        }));
    }

    println!("{} {}", "Session:".bold(), name);
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Balance".to_string(), money(&ctx, balance)]);
    table.add_row(vec!["Transactions".to_string(), transactions.to_string()]);
    table.add_row(vec!["Contacts".to_string(), contacts.to_string()]);
    println!("{}", table);
    println!();

    println!("{}", "What next?".bold());
    for (command, description) in MENU {
        println!("  {:<18} {}", command.cyan(), description.dimmed());
    }

    Ok(())
}
