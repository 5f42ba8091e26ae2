//! Alke Wallet CLI - a demo wallet in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use uuid::Uuid;
use wallet_core::services::LoggingService;
use wallet_core::TransactionKind;

mod commands;
mod output;

use commands::{auth, contacts, doctor, ledger, logs, reset, send, status, transactions};

/// Alke Wallet - a demo wallet in your terminal
#[derive(Parser)]
#[command(name = "aw", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Prompted (with confirmation) when omitted
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in to an existing account
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Prompted when omitted
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// End the current session
    Logout,

    /// Show the session, balance and available actions
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the available balance
    Balance {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add money to the wallet
    Deposit {
        /// Whole amount; prompted when omitted
        amount: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Take money out of the wallet
    Withdraw {
        /// Whole amount; prompted when omitted
        amount: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer money to a saved contact
    Send {
        /// Whole amount; prompted when omitted
        amount: Option<String>,
        /// Contact id (see `aw contacts list`); a picker is shown when omitted
        #[arg(long)]
        contact: Option<Uuid>,
        /// Narrow the picker to contacts matching this text
        #[arg(long, conflicts_with = "contact")]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record money received from someone
    Receive {
        /// Whole amount; prompted when omitted
        amount: Option<String>,
        /// Who sent the money
        #[arg(long)]
        from: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saved contacts
    Contacts {
        #[command(subcommand)]
        command: contacts::ContactsCommands,
    },

    /// Show transaction history, most recent first
    Transactions {
        /// Only one kind: deposit, send, receive or withdraw
        #[arg(long)]
        kind: Option<TransactionKind>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete all wallet data
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check stored records for damage
    Doctor {
        /// Show verbose output
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    /// Name recorded in the event log
    fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Status { .. } => "status",
            Commands::Balance { .. } => "balance",
            Commands::Deposit { .. } => "deposit",
            Commands::Withdraw { .. } => "withdraw",
            Commands::Send { .. } => "send",
            Commands::Receive { .. } => "receive",
            Commands::Contacts { .. } => "contacts",
            Commands::Transactions { .. } => "transactions",
            Commands::Reset { .. } => "reset",
            Commands::Doctor { .. } => "doctor",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = commands::get_logger();
    let command_name = cli.command.name();

    let result = run(cli, logger.as_ref());

    match result {
        Ok(()) => {
            if let Some(l) = &logger {
                let _ = l.log_command(command_name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::error(&error_text(&e));
            if let Some(l) = &logger {
                let _ = l.log_failure(command_name, error_kind(&e));
            }
            ExitCode::FAILURE
        }
    }
}

/// What the user sees. Mistakes in input get the bare message; store
/// failures keep the full context chain and point at `aw doctor`.
fn error_text(error: &anyhow::Error) -> String {
    match error.downcast_ref::<wallet_core::Error>() {
        Some(core) if core.is_user_error() => core.to_string(),
        Some(_) => format!("{:#}\nRun `aw doctor` to check the stored records.", error),
        None => format!("{:#}", error),
    }
}

/// Only the error kind is logged; messages can carry emails or names
fn error_kind(error: &anyhow::Error) -> &'static str {
    error
        .downcast_ref::<wallet_core::Error>()
        .map(wallet_core::Error::kind)
        .unwrap_or("internal")
}

fn run(cli: Cli, logger: Option<&LoggingService>) -> Result<()> {
    match cli.command {
        Commands::Register { name, email, password, json } => {
            auth::run_register(name, email, password, json)
        }
        Commands::Login { email, password, json } => auth::run_login(email, password, json),
        Commands::Logout => auth::run_logout(),
        Commands::Status { json } => status::run(json),
        Commands::Balance { json } => ledger::run_balance(json),
        Commands::Deposit { amount, json } => ledger::run_deposit(amount, json),
        Commands::Withdraw { amount, json } => ledger::run_withdraw(amount, json),
        Commands::Send { amount, contact, search, json } => send::run(contact, search, amount, json),
        Commands::Receive { amount, from, json } => ledger::run_receive(from, amount, json),
        Commands::Contacts { command } => contacts::run(command),
        Commands::Transactions { kind, json } => transactions::run(kind, json),
        Commands::Reset { force, json } => reset::run(force, json),
        Commands::Doctor { verbose, json } => doctor::run(verbose, json),
        Commands::Logs { command } => logs::run(command, logger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send_by_contact_id() {
        let id = Uuid::new_v4();
        let id_arg = id.to_string();
        let cli = Cli::try_parse_from(["aw", "send", "1000", "--contact", id_arg.as_str()]).unwrap();
        match cli.command {
            Commands::Send { amount, contact, .. } => {
                assert_eq!(amount.as_deref(), Some("1000"));
                assert_eq!(contact, Some(id));
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_parse_transaction_kind_filter() {
        let cli = Cli::try_parse_from(["aw", "transactions", "--kind", "withdraw"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Transactions { kind: Some(TransactionKind::Withdraw), .. }
        ));
        assert!(Cli::try_parse_from(["aw", "transactions", "--kind", "refund"]).is_err());
    }

    #[test]
    fn test_error_kind_omits_user_data() {
        let err = anyhow::Error::from(wallet_core::Error::DuplicateAccount("ana@x.com".into()));
        assert_eq!(error_kind(&err), "duplicate_account");
        assert_eq!(error_kind(&anyhow::anyhow!("boom")), "internal");
    }

    #[test]
    fn test_user_error_shows_bare_message() {
        let err = anyhow::Error::from(wallet_core::Error::InvalidCredentials)
            .context("Login failed");
        assert_eq!(error_text(&err), "Invalid credentials");
    }

    #[test]
    fn test_store_error_points_at_doctor() {
        let err = anyhow::Error::from(wallet_core::Error::storage("disk full"))
            .context("Failed to open wallet");
        let text = error_text(&err);
        assert!(text.starts_with("Failed to open wallet: Storage error: disk full"));
        assert!(text.contains("aw doctor"));
    }
}
