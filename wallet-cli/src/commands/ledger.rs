//! Balance, deposit, withdraw and receive

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use wallet_core::services::LedgerReceipt;
use wallet_core::{format_signed, OperationResult, WalletContext};

use super::{get_session, money, read_amount, read_text};
use crate::output;

pub fn run_balance(json: bool) -> Result<()> {
    let (ctx, session) = get_session()?;
    let balance = ctx.ledger_service.balance(&session)?;

    if json {
        return output::json(&json!({
            "balance": balance,
            "formatted": money(&ctx, balance),
        }));
    }

    println!("Available balance: {}", money(&ctx, balance).bold());
    Ok(())
}

pub fn run_deposit(amount: Option<String>, json: bool) -> Result<()> {
    let (ctx, session) = get_session()?;
    let amount = read_amount(amount)?;
    let receipt = ctx.ledger_service.deposit(&session, amount)?;
    print_receipt(&ctx, &receipt, "Deposit completed", json)
}

pub fn run_withdraw(amount: Option<String>, json: bool) -> Result<()> {
    let (ctx, session) = get_session()?;
    let amount = read_amount(amount)?;
    let receipt = ctx.ledger_service.withdraw(&session, amount)?;
    print_receipt(&ctx, &receipt, "Withdrawal completed", json)
}

pub fn run_receive(from: Option<String>, amount: Option<String>, json: bool) -> Result<()> {
    let (ctx, session) = get_session()?;
    let from = read_text(from, "Received from")?;
    let amount = read_amount(amount)?;
    let receipt = ctx.ledger_service.receive(&session, &from, amount)?;
    print_receipt(&ctx, &receipt, "Payment received", json)
}

/// Shared confirmation for every balance-changing command
pub(crate) fn print_receipt(
    ctx: &WalletContext,
    receipt: &LedgerReceipt,
    headline: &str,
    json: bool,
) -> Result<()> {
    if json {
        let result = OperationResult::ok(receipt)
            .with_context("formatted_balance", json!(money(ctx, receipt.balance)));
        return output::json(&result);
    }

    output::success(headline);
    println!(
        "  {}  {}",
        receipt.transaction.title,
        format_signed(receipt.transaction.amount, &ctx.config.currency_symbol)
    );
    println!("  New balance: {}", money(ctx, receipt.balance).bold());
    Ok(())
}
