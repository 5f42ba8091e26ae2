//! Reset service - wipe all wallet data

use std::sync::Arc;

use crate::domain::result::Result;
use crate::ports::Repository;

/// Restores a clean slate by deleting every key in the wallet namespace
pub struct ResetService {
    repository: Arc<dyn Repository>,
}

impl ResetService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Remove users, session, balances, transactions and contacts.
    /// Returns the number of keys removed.
    pub fn reset_all(&self) -> Result<usize> {
        self.repository.clear_namespace()
    }
}
