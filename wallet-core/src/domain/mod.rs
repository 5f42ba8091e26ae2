//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod contact;
pub mod money;
pub mod result;
mod session;
mod transaction;
mod user;

pub use contact::{is_valid_account_number, Contact, NewContact, MIN_ACCOUNT_NUMBER_LEN};
pub use session::Session;
pub use transaction::{Transaction, TransactionKind, TIMESTAMP_FORMAT};
pub use user::{normalize_email, User, MIN_PASSWORD_LEN};
