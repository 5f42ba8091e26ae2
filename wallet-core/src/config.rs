//! Configuration management
//!
//! Settings live in `settings.json` inside the wallet directory:
//! ```json
//! {
//!   "app": { "initialBalance": 250000, "suggestionLimit": 6, "currencySymbol": "$" }
//! }
//! ```
//! The file is read-only for the wallet; keys it does not know are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::domain::result::{Error, Result};

/// Balance credited to every new account
pub const DEFAULT_INITIAL_BALANCE: i64 = 250_000;

/// Maximum number of contact suggestions returned while typing
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Environment override for the initial balance (for CI/testing)
pub const INITIAL_BALANCE_ENV: &str = "ALKE_WALLET_INITIAL_BALANCE";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    initial_balance: Option<i64>,
    #[serde(default)]
    suggestion_limit: Option<usize>,
    #[serde(default)]
    currency_symbol: Option<String>,
}

/// Wallet configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub initial_balance: i64,
    pub suggestion_limit: usize,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Config {
    /// Load config from the wallet directory
    ///
    /// A missing or unreadable settings file yields the defaults. The initial
    /// balance can be overridden through `ALKE_WALLET_INITIAL_BALANCE`.
    pub fn load(wallet_dir: &Path) -> Result<Self> {
        let raw = read_settings(wallet_dir)?;

        let initial_balance = match std::env::var(INITIAL_BALANCE_ENV).ok() {
            Some(value) => value.trim().parse::<i64>().map_err(|_| {
                Error::Config(format!("{} must be an integer, got '{}'", INITIAL_BALANCE_ENV, value))
            })?,
            None => raw.app.initial_balance.unwrap_or(DEFAULT_INITIAL_BALANCE),
        };

        let config = Self {
            initial_balance,
            suggestion_limit: raw.app.suggestion_limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT),
            currency_symbol: raw
                .app
                .currency_symbol
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the services cannot work with
    fn validate(&self) -> Result<()> {
        if self.initial_balance < 0 {
            return Err(Error::Config(format!(
                "initialBalance cannot be negative ({})",
                self.initial_balance
            )));
        }
        if self.suggestion_limit == 0 {
            return Err(Error::Config("suggestionLimit must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn read_settings(wallet_dir: &Path) -> Result<SettingsFile> {
    let settings_path = wallet_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
