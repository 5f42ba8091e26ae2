//! Ledger service - balance and transaction log
//!
//! Every mutation is a plain read-modify-write: read the balance, check it,
//! write the new balance, then prepend one transaction. The transaction log
//! is never sorted; its order is the order of prepends.

use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::money::ensure_positive;
use crate::domain::result::{Error, Result};
use crate::domain::{Session, Transaction, TransactionKind};
use crate::ports::Repository;

use super::recover;

/// Outcome of a balance-changing operation
#[derive(Debug, Clone, Serialize)]
pub struct LedgerReceipt {
    pub transaction: Transaction,
    /// Balance after the operation
    pub balance: i64,
}

/// Ledger service for one user's money
pub struct LedgerService {
    repository: Arc<dyn Repository>,
    clock: fn() -> DateTime<Local>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            repository,
            clock: Local::now,
        }
    }

    /// Use a fixed time source (tests)
    pub fn with_clock(repository: Arc<dyn Repository>, clock: fn() -> DateTime<Local>) -> Self {
        Self { repository, clock }
    }

    /// Current balance; 0 when unset or unreadable
    pub fn balance(&self, session: &Session) -> Result<i64> {
        Ok(recover(self.repository.balance(&session.key()))?.unwrap_or(0))
    }

    pub fn deposit(&self, session: &Session, amount: i64) -> Result<LedgerReceipt> {
        ensure_positive(amount)?;
        let current = self.balance(session)?;
        let balance = credit(current, amount)?;
        self.apply(session, balance, Transaction::deposit(amount, (self.clock)()))
    }

    pub fn withdraw(&self, session: &Session, amount: i64) -> Result<LedgerReceipt> {
        ensure_positive(amount)?;
        let current = self.balance(session)?;
        let balance = debit(current, amount)?;
        self.apply(session, balance, Transaction::withdraw(amount, (self.clock)()))
    }

    /// Transfer to a saved contact, addressed by its id
    pub fn send(
        &self,
        session: &Session,
        contact_id: Option<Uuid>,
        amount: i64,
    ) -> Result<LedgerReceipt> {
        let contact_id = contact_id.ok_or_else(|| Error::validation("Select a contact"))?;
        ensure_positive(amount)?;

        let contacts = recover(self.repository.contacts(&session.key()))?;
        let contact = contacts
            .into_iter()
            .find(|c| c.id == contact_id)
            .ok_or_else(|| Error::not_found(format!("Contact {}", contact_id)))?;

        let current = self.balance(session)?;
        let balance = debit(current, amount)?;
        self.apply(
            session,
            balance,
            Transaction::send(&contact.name, amount, (self.clock)()),
        )
    }

    /// Record money received from someone (simulated)
    pub fn receive(&self, session: &Session, from_name: &str, amount: i64) -> Result<LedgerReceipt> {
        let from_name = from_name.trim();
        if from_name.is_empty() {
            return Err(Error::validation("Enter who sent the money"));
        }
        ensure_positive(amount)?;

        let current = self.balance(session)?;
        let balance = credit(current, amount)?;
        self.apply(
            session,
            balance,
            Transaction::receive(from_name, amount, (self.clock)()),
        )
    }

    /// Transaction log, most recent first, optionally restricted to one kind
    pub fn transactions(
        &self,
        session: &Session,
        filter: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>> {
        let transactions = recover(self.repository.transactions(&session.key()))?;
        Ok(match filter {
            Some(kind) => transactions.into_iter().filter(|tx| tx.kind == kind).collect(),
            None => transactions,
        })
    }

    fn apply(&self, session: &Session, balance: i64, transaction: Transaction) -> Result<LedgerReceipt> {
        let key = session.key();
        self.repository.set_balance(&key, balance)?;

        let mut transactions = recover(self.repository.transactions(&key))?;
        transactions.insert(0, transaction.clone());
        self.repository.save_transactions(&key, &transactions)?;

        Ok(LedgerReceipt { transaction, balance })
    }
}

fn credit(current: i64, amount: i64) -> Result<i64> {
    current
        .checked_add(amount)
        .ok_or_else(|| Error::validation("Amount is too large"))
}

fn debit(current: i64, amount: i64) -> Result<i64> {
    if amount > current {
        return Err(Error::InsufficientFunds {
            requested: amount,
            available: current,
        });
    }
    Ok(current - amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv::KvRepository;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::NewContact;
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
    }

    fn setup(balance: i64) -> (LedgerService, Arc<dyn Repository>, Session) {
        let repo: Arc<dyn Repository> =
            Arc::new(KvRepository::new(Arc::new(MemoryStore::new())));
        repo.set_balance("ana@x.com", balance).unwrap();
        let service = LedgerService::with_clock(Arc::clone(&repo), fixed_clock);
        (service, repo, Session::new("Ana@X.com"))
    }

    #[test]
    fn test_deposit_prepends_and_credits() {
        let (service, repo, session) = setup(250_000);
        let receipt = service.deposit(&session, 50_000).unwrap();

        assert_eq!(receipt.balance, 300_000);
        assert_eq!(receipt.transaction.amount, 50_000);
        assert_eq!(receipt.transaction.timestamp, "15-01-2025, 10:30");
        assert_eq!(repo.balance("ana@x.com").unwrap(), Some(300_000));
        assert_eq!(service.transactions(&session, None).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        let (service, _, session) = setup(100);
        for amount in [0, -1] {
            assert!(matches!(service.deposit(&session, amount), Err(Error::Validation(_))));
            assert!(matches!(service.withdraw(&session, amount), Err(Error::Validation(_))));
            assert!(matches!(
                service.receive(&session, "Bob", amount),
                Err(Error::Validation(_))
            ));
        }
        assert!(service.transactions(&session, None).unwrap().is_empty());
    }

    #[test]
    fn test_withdraw_entire_balance_allowed() {
        let (service, _, session) = setup(100);
        let receipt = service.withdraw(&session, 100).unwrap();
        assert_eq!(receipt.balance, 0);
        assert_eq!(receipt.transaction.amount, -100);
    }

    #[test]
    fn test_overdraft_leaves_state_untouched() {
        let (service, _, session) = setup(100);
        let err = service.withdraw(&session, 101).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientFunds {
                requested: 101,
                available: 100
            }
        ));
        assert_eq!(service.balance(&session).unwrap(), 100);
        assert!(service.transactions(&session, None).unwrap().is_empty());
    }

    #[test]
    fn test_send_resolves_contact_by_id() {
        let (service, repo, session) = setup(10_000);
        let bob = NewContact::new("Bob", "1234567890", "Banco").validate().unwrap();
        let eve = NewContact::new("Eve", "0987654321", "Banco").validate().unwrap();
        repo.save_contacts("ana@x.com", &[bob.clone(), eve.clone()]).unwrap();

        let receipt = service.send(&session, Some(eve.id), 1_000).unwrap();
        assert_eq!(receipt.transaction.title, "Transfer to Eve");
        assert_eq!(receipt.transaction.kind, TransactionKind::Send);
        assert_eq!(receipt.balance, 9_000);
    }

    #[test]
    fn test_send_errors() {
        let (service, _, session) = setup(10_000);
        assert!(matches!(service.send(&session, None, 1), Err(Error::Validation(_))));
        assert!(matches!(
            service.send(&session, Some(Uuid::new_v4()), 1),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_receive_requires_sender() {
        let (service, _, session) = setup(0);
        assert!(matches!(service.receive(&session, "  ", 10), Err(Error::Validation(_))));

        let receipt = service.receive(&session, " Carla ", 10).unwrap();
        assert_eq!(receipt.transaction.title, "Received from Carla");
        assert_eq!(receipt.balance, 10);
    }

    #[test]
    fn test_filter_keeps_head_first_order() {
        let (service, _, session) = setup(1_000);
        service.deposit(&session, 1).unwrap();
        service.withdraw(&session, 2).unwrap();
        service.deposit(&session, 3).unwrap();

        let deposits = service
            .transactions(&session, Some(TransactionKind::Deposit))
            .unwrap();
        let amounts: Vec<i64> = deposits.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![3, 1]);
    }

    #[test]
    fn test_unreadable_balance_counts_as_zero() {
        let store = Arc::new(MemoryStore::with_entries([
            ("aw_balance_ana@x.com", "NaN"),
            ("aw_transactions_ana@x.com", "oops"),
        ]));
        let repo: Arc<dyn Repository> = Arc::new(KvRepository::new(store));
        let service = LedgerService::new(repo);
        let session = Session::new("ana@x.com");

        assert_eq!(service.balance(&session).unwrap(), 0);
        assert!(service.transactions(&session, None).unwrap().is_empty());

        let receipt = service.deposit(&session, 5).unwrap();
        assert_eq!(receipt.balance, 5);
        assert_eq!(service.transactions(&session, None).unwrap().len(), 1);
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let (service, _, session) = setup(i64::MAX);
        assert!(matches!(service.deposit(&session, 1), Err(Error::Validation(_))));
        assert_eq!(service.balance(&session).unwrap(), i64::MAX);
    }
}
