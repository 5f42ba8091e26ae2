//! Wallet Core - business logic for the Alke demo wallet
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, Transaction, Contact, Session)
//! - **ports**: Trait definitions for external dependencies (KeyValueStore, Repository)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, in-memory, key-value repository)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::duckdb::DuckDbStore;
use adapters::kv::KvRepository;
use config::Config;
use ports::{KeyValueStore, Repository};
use services::*;

// Re-export commonly used types at crate root
pub use domain::money::{format_currency, format_signed, parse_amount};
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{Contact, NewContact, Session, Transaction, TransactionKind, User};

/// Wallet store file name inside the wallet directory
pub const WALLET_DB_FILE: &str = "wallet.duckdb";

/// Main context for wallet operations
///
/// Holds the configuration, the repository and every service wired to it.
pub struct WalletContext {
    pub config: Config,
    pub repository: Arc<dyn Repository>,
    pub account_service: AccountService,
    pub session_service: SessionService,
    pub ledger_service: LedgerService,
    pub contact_service: ContactService,
    pub reset_service: ResetService,
    pub doctor_service: DoctorService,
}

impl WalletContext {
    /// Open the wallet stored in `wallet_dir`, creating it if needed
    pub fn new(wallet_dir: &Path) -> Result<Self> {
        let config = Config::load(wallet_dir)?;
        let store = DuckDbStore::open(&wallet_dir.join(WALLET_DB_FILE))?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Wire the services over an arbitrary key-value store
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let repository: Arc<dyn Repository> = Arc::new(KvRepository::new(store));

        let account_service = AccountService::new(Arc::clone(&repository), config.initial_balance);
        let session_service = SessionService::new(Arc::clone(&repository));
        let ledger_service = LedgerService::new(Arc::clone(&repository));
        let contact_service = ContactService::new(Arc::clone(&repository), config.suggestion_limit);
        let reset_service = ResetService::new(Arc::clone(&repository));
        let doctor_service = DoctorService::new(Arc::clone(&repository));

        Self {
            config,
            repository,
            account_service,
            session_service,
            ledger_service,
            contact_service,
            reset_service,
            doctor_service,
        }
    }
}
