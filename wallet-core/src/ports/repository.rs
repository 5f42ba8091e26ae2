//! Repository port - typed storage abstraction

use crate::domain::result::Result;
use crate::domain::{Contact, Transaction, User};

/// Typed access to every record the wallet persists
///
/// Per-user methods take the lower-cased email (see `Session::key`).
/// Missing records read as empty lists or `None`; records that exist but
/// cannot be decoded are reported as `Error::CorruptRecord` so callers decide
/// whether to fall back to a default.
pub trait Repository: Send + Sync {
    // === Users ===

    /// All registered users, in registration order
    fn users(&self) -> Result<Vec<User>>;

    /// Replace the user list
    fn save_users(&self, users: &[User]) -> Result<()>;

    // === Session ===

    /// Email of the logged-in user, if any
    fn current_user(&self) -> Result<Option<String>>;

    fn set_current_user(&self, email: &str) -> Result<()>;

    fn clear_current_user(&self) -> Result<()>;

    // === Balances ===

    /// Stored balance, `None` if never set
    fn balance(&self, user_key: &str) -> Result<Option<i64>>;

    fn set_balance(&self, user_key: &str, balance: i64) -> Result<()>;

    // === Transactions ===

    /// Transaction log, most recent first
    fn transactions(&self, user_key: &str) -> Result<Vec<Transaction>>;

    fn save_transactions(&self, user_key: &str, transactions: &[Transaction]) -> Result<()>;

    // === Contacts ===

    /// Contacts in insertion order
    fn contacts(&self, user_key: &str) -> Result<Vec<Contact>>;

    fn save_contacts(&self, user_key: &str, contacts: &[Contact]) -> Result<()>;

    // === Maintenance ===

    /// Every stored key in the wallet namespace
    fn namespaced_keys(&self) -> Result<Vec<String>>;

    /// Remove every key in the wallet namespace, returning how many were removed
    fn clear_namespace(&self) -> Result<usize>;
}
