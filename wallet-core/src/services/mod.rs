//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod account;
mod contact;
mod doctor;
mod ledger;
pub mod logging;
pub mod migration;
mod reset;
mod session;

pub use account::AccountService;
pub use contact::ContactService;
pub use doctor::{CheckResult, CheckStatus, DoctorResult, DoctorService, DoctorSummary};
pub use ledger::{LedgerReceipt, LedgerService};
pub use logging::{LogEntry, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use reset::ResetService;
pub use session::SessionService;

use crate::domain::result::{Error, Result};

/// Treat an undecodable record as its empty default. Storage failures still propagate.
pub(crate) fn recover<T: Default>(result: Result<T>) -> Result<T> {
    match result {
        Err(Error::CorruptRecord { .. }) => Ok(T::default()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recover_only_swallows_corrupt_records() {
        let corrupt: Result<Vec<u8>> = Err(Error::corrupt("aw_users", "bad json"));
        assert_eq!(recover(corrupt).unwrap(), Vec::<u8>::new());

        let storage: Result<i64> = Err(Error::storage("disk gone"));
        assert!(matches!(recover(storage), Err(Error::Storage(_))));
    }
}
