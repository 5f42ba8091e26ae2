//! Typed repository over any key-value store
//!
//! Key layout (all keys share the `aw_` namespace):
//!
//! | key                         | value                                 |
//! |-----------------------------|---------------------------------------|
//! | `aw_users`                  | JSON array of users                   |
//! | `aw_current_user`           | plain email string                    |
//! | `aw_balance_<email>`        | integer as a decimal string           |
//! | `aw_transactions_<email>`   | JSON array, most recent first         |
//! | `aw_contacts_<email>`       | JSON array, insertion order           |

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{Contact, Transaction, User};
use crate::ports::{KeyValueStore, Repository};

/// Namespace prefix shared by every wallet key
pub const KEY_PREFIX: &str = "aw_";

/// Storage key builders
pub mod keys {
    use super::KEY_PREFIX;

    pub fn users() -> String {
        format!("{}users", KEY_PREFIX)
    }

    pub fn current_user() -> String {
        format!("{}current_user", KEY_PREFIX)
    }

    pub fn balance(user_key: &str) -> String {
        format!("{}balance_{}", KEY_PREFIX, user_key.to_lowercase())
    }

    pub fn transactions(user_key: &str) -> String {
        format!("{}transactions_{}", KEY_PREFIX, user_key.to_lowercase())
    }

    pub fn contacts(user_key: &str) -> String {
        format!("{}contacts_{}", KEY_PREFIX, user_key.to_lowercase())
    }
}

/// [`Repository`] that encodes every entity as JSON under a namespaced key
pub struct KvRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| Error::corrupt(key, e)),
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(key, &raw)
    }
}

impl Repository for KvRepository {
    fn users(&self) -> Result<Vec<User>> {
        self.read_list(&keys::users())
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        self.write_list(&keys::users(), users)
    }

    fn current_user(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(&keys::current_user())?
            .filter(|email| !email.trim().is_empty()))
    }

    fn set_current_user(&self, email: &str) -> Result<()> {
        self.store.set(&keys::current_user(), email)
    }

    fn clear_current_user(&self) -> Result<()> {
        self.store.remove(&keys::current_user())
    }

    fn balance(&self, user_key: &str) -> Result<Option<i64>> {
        let key = keys::balance(user_key);
        match self.store.get(&key)? {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|e| Error::corrupt(key, e)),
        }
    }

    fn set_balance(&self, user_key: &str, balance: i64) -> Result<()> {
        self.store.set(&keys::balance(user_key), &balance.to_string())
    }

    fn transactions(&self, user_key: &str) -> Result<Vec<Transaction>> {
        self.read_list(&keys::transactions(user_key))
    }

    fn save_transactions(&self, user_key: &str, transactions: &[Transaction]) -> Result<()> {
        self.write_list(&keys::transactions(user_key), transactions)
    }

    fn contacts(&self, user_key: &str) -> Result<Vec<Contact>> {
        self.read_list(&keys::contacts(user_key))
    }

    fn save_contacts(&self, user_key: &str, contacts: &[Contact]) -> Result<()> {
        self.write_list(&keys::contacts(user_key), contacts)
    }

    fn namespaced_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(KEY_PREFIX))
            .collect())
    }

    fn clear_namespace(&self) -> Result<usize> {
        let doomed = self.namespaced_keys()?;

        for key in &doomed {
            self.store.remove(key)?;
        }
        Ok(doomed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use chrono::Local;

    fn repo_with(entries: Vec<(&str, &str)>) -> KvRepository {
        KvRepository::new(Arc::new(MemoryStore::with_entries(entries)))
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(keys::users(), "aw_users");
        assert_eq!(keys::current_user(), "aw_current_user");
        assert_eq!(keys::balance("Ana@X.com"), "aw_balance_ana@x.com");
        assert_eq!(keys::transactions("ana@x.com"), "aw_transactions_ana@x.com");
        assert_eq!(keys::contacts("ana@x.com"), "aw_contacts_ana@x.com");
    }

    #[test]
    fn test_missing_records_read_as_empty() {
        let repo = repo_with(vec![]);
        assert!(repo.users().unwrap().is_empty());
        assert_eq!(repo.balance("ana@x.com").unwrap(), None);
        assert!(repo.transactions("ana@x.com").unwrap().is_empty());
        assert!(repo.contacts("ana@x.com").unwrap().is_empty());
        assert_eq!(repo.current_user().unwrap(), None);
    }

    #[test]
    fn test_corrupt_records_are_reported() {
        let repo = repo_with(vec![
            ("aw_users", "{not json"),
            ("aw_balance_ana@x.com", "lots"),
        ]);

        match repo.users() {
            Err(Error::CorruptRecord { key, .. }) => assert_eq!(key, "aw_users"),
            other => panic!("expected corrupt record, got {:?}", other),
        }
        assert!(matches!(
            repo.balance("ana@x.com"),
            Err(Error::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_transactions_round_trip_in_order() {
        let repo = repo_with(vec![]);
        let now = Local::now();
        let txs = vec![
            Transaction::withdraw(30000, now),
            Transaction::deposit(50000, now),
        ];

        repo.save_transactions("ana@x.com", &txs).unwrap();
        assert_eq!(repo.transactions("ana@x.com").unwrap(), txs);
    }

    #[test]
    fn test_clear_namespace_keeps_foreign_keys() {
        let store = Arc::new(MemoryStore::with_entries(vec![
            ("aw_users", "[]"),
            ("aw_current_user", "ana@x.com"),
            ("aw_balance_ana@x.com", "1"),
            ("theme", "dark"),
        ]));
        let repo = KvRepository::new(store.clone());

        assert_eq!(repo.clear_namespace().unwrap(), 3);
        assert_eq!(store.keys().unwrap(), vec!["theme"]);
        assert_eq!(repo.current_user().unwrap(), None);
    }
}
