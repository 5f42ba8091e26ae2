//! Transactions command - history, most recent first

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color};
use wallet_core::{format_signed, TransactionKind};

use super::get_session;
use crate::output;

pub fn run(kind: Option<TransactionKind>, json: bool) -> Result<()> {
    let (ctx, session) = get_session()?;
    let transactions = ctx.ledger_service.transactions(&session, kind)?;

    if json {
        return output::json(&transactions);
    }

    if transactions.is_empty() {
        let message = match kind {
            Some(k) => format!("No {} transactions yet.", k),
            None => "No transactions yet.".to_string(),
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    let symbol = &ctx.config.currency_symbol;
    let mut table = output::create_table();
    table.set_header(vec!["Date", "Description", "Kind", "Amount"]);
    for tx in &transactions {
        let color = if tx.is_inflow() { Color::Green } else { Color::Red };
        table.add_row(vec![
            Cell::new(&tx.timestamp),
            Cell::new(&tx.title),
            Cell::new(tx.kind),
            Cell::new(format_signed(tx.amount, symbol)).fg(color),
        ]);
    }
    println!("{}", table);
    println!("{} transaction(s)", transactions.len());

    Ok(())
}
