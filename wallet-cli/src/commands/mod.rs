//! CLI command implementations

pub mod auth;
pub mod contacts;
pub mod doctor;
pub mod ledger;
pub mod logs;
pub mod reset;
pub mod send;
pub mod status;
pub mod transactions;

use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::Input;
use wallet_core::services::LoggingService;
use wallet_core::{format_currency, parse_amount, Session, WalletContext};

/// Overrides the wallet directory (tests, CI, multiple wallets)
pub const WALLET_DIR_ENV: &str = "ALKE_WALLET_DIR";

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let wallet_dir = get_wallet_dir().ok()?;
    std::fs::create_dir_all(&wallet_dir).ok()?;
    LoggingService::new(&wallet_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Wallet directory from the environment, or `~/.alke-wallet`
pub fn get_wallet_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(WALLET_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".alke-wallet"))
}

/// Open the wallet, creating its directory on first use
pub fn get_context() -> Result<WalletContext> {
    let wallet_dir = get_wallet_dir()?;

    std::fs::create_dir_all(&wallet_dir)
        .with_context(|| format!("Failed to create wallet directory: {:?}", wallet_dir))?;

    WalletContext::new(&wallet_dir).context("Failed to open wallet")
}

/// Open the wallet and demand a logged-in user
pub fn get_session() -> Result<(WalletContext, Session)> {
    let ctx = get_context()?;
    let session = ctx.session_service.require()?;
    Ok((ctx, session))
}

/// Amount from a flag, or prompted when the flag was omitted
pub fn read_amount(amount: Option<String>) -> Result<i64> {
    let raw = match amount {
        Some(a) => a,
        None => Input::new().with_prompt("Amount").interact_text()?,
    };
    Ok(parse_amount(&raw)?)
}

/// Text from a flag, or prompted when the flag was omitted
pub fn read_text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Currency string using the configured symbol
pub fn money(ctx: &WalletContext, amount: i64) -> String {
    format_currency(amount, &ctx.config.currency_symbol)
}
