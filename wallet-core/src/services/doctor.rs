//! Doctor service - stored data health checks
//!
//! The ledger and contact services quietly treat unreadable records as
//! empty. The doctor is where those records become visible.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::adapters::kv::KEY_PREFIX;
use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::Repository;

/// Doctor service for health checks
pub struct DoctorService {
    repository: Arc<dyn Repository>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<serde_json::Value>>,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            message: message.into(),
            details: None,
        }
    }

    fn from_problems(
        status: CheckStatus,
        ok_message: &str,
        problem_message: String,
        problems: Vec<serde_json::Value>,
    ) -> Self {
        if problems.is_empty() {
            Self::pass(ok_message)
        } else {
            Self {
                status,
                message: problem_message,
                details: Some(problems),
            }
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DoctorSummary {
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub checks: BTreeMap<String, CheckResult>,
    pub summary: DoctorSummary,
}

impl DoctorService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Run all health checks
    pub fn run_checks(&self) -> Result<DoctorResult> {
        let mut checks = BTreeMap::new();

        let users = match self.repository.users() {
            Ok(users) => {
                checks.insert(
                    "users".to_string(),
                    CheckResult::pass(format!("{} registered user(s)", users.len())),
                );
                users
            }
            Err(Error::CorruptRecord { key, reason }) => {
                checks.insert(
                    "users".to_string(),
                    CheckResult {
                        status: CheckStatus::Error,
                        message: "User list cannot be read".to_string(),
                        details: Some(vec![json!({ "key": key, "reason": reason })]),
                    },
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        checks.insert("session".to_string(), self.check_session(&users)?);
        checks.insert("balances".to_string(), self.check_balances(&users)?);
        checks.insert("transactions".to_string(), self.check_lists(&users, ListKind::Transactions)?);
        checks.insert("contacts".to_string(), self.check_lists(&users, ListKind::Contacts)?);
        checks.insert("orphaned_records".to_string(), self.check_orphans(&users)?);

        let mut summary = DoctorSummary::default();
        for check in checks.values() {
            match check.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Error => summary.errors += 1,
            }
        }

        Ok(DoctorResult { checks, summary })
    }

    fn check_session(&self, users: &[User]) -> Result<CheckResult> {
        Ok(match self.repository.current_user()? {
            None => CheckResult::pass("No active session"),
            Some(email) if users.iter().any(|u| u.has_email(&email)) => {
                CheckResult::pass("Active session belongs to a registered user")
            }
            Some(_) => CheckResult {
                status: CheckStatus::Warning,
                message: "Active session refers to an unknown user".to_string(),
                details: None,
            },
        })
    }

    fn check_balances(&self, users: &[User]) -> Result<CheckResult> {
        let mut problems = Vec::new();
        let mut worst = CheckStatus::Pass;

        for user in users {
            let key = user.key();
            match self.repository.balance(&key) {
                Ok(Some(balance)) if balance < 0 => {
                    worst = CheckStatus::Error;
                    problems.push(json!({ "user": key, "problem": "negative balance", "balance": balance }));
                }
                Ok(Some(_)) => {}
                Ok(None) => {
                    if worst == CheckStatus::Pass {
                        worst = CheckStatus::Warning;
                    }
                    problems.push(json!({ "user": key, "problem": "missing balance" }));
                }
                Err(Error::CorruptRecord { reason, .. }) => {
                    worst = CheckStatus::Error;
                    problems.push(json!({ "user": key, "problem": "unreadable balance", "reason": reason }));
                }
                Err(e) => return Err(e),
            }
        }

        let count = problems.len();
        Ok(CheckResult::from_problems(
            worst,
            "All balances are readable",
            format!("{} balance record(s) need attention", count),
            problems,
        ))
    }

    fn check_lists(&self, users: &[User], kind: ListKind) -> Result<CheckResult> {
        let mut problems = Vec::new();

        for user in users {
            let key = user.key();
            let result = match kind {
                ListKind::Transactions => self.repository.transactions(&key).map(|_| ()),
                ListKind::Contacts => self.repository.contacts(&key).map(|_| ()),
            };
            match result {
                Ok(()) => {}
                Err(Error::CorruptRecord { reason, .. }) => {
                    problems.push(json!({ "user": key, "reason": reason }));
                }
                Err(e) => return Err(e),
            }
        }

        let count = problems.len();
        Ok(CheckResult::from_problems(
            CheckStatus::Error,
            kind.ok_message(),
            format!("{} {} list(s) cannot be read and will show as empty", count, kind.noun()),
            problems,
        ))
    }

    /// Per-user records whose owner is not a registered user
    fn check_orphans(&self, users: &[User]) -> Result<CheckResult> {
        let known: HashSet<String> = users.iter().map(User::key).collect();
        let per_user_prefixes = ["balance_", "transactions_", "contacts_"];

        let mut problems = Vec::new();
        for key in self.repository.namespaced_keys()? {
            let Some(rest) = key.strip_prefix(KEY_PREFIX) else {
                continue;
            };
            let owner = per_user_prefixes
                .iter()
                .find_map(|prefix| rest.strip_prefix(prefix));
            if let Some(owner) = owner {
                if !known.contains(owner) {
                    problems.push(json!({ "key": key }));
                }
            }
        }

        let count = problems.len();
        Ok(CheckResult::from_problems(
            CheckStatus::Warning,
            "No orphaned records found",
            format!("{} record(s) belong to no registered user", count),
            problems,
        ))
    }
}

#[derive(Clone, Copy)]
enum ListKind {
    Transactions,
    Contacts,
}

impl ListKind {
    fn noun(&self) -> &'static str {
        match self {
            ListKind::Transactions => "transaction",
            ListKind::Contacts => "contact",
        }
    }

    fn ok_message(&self) -> &'static str {
        match self {
            ListKind::Transactions => "All transaction lists are readable",
            ListKind::Contacts => "All contact lists are readable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv::KvRepository;
    use crate::adapters::memory::MemoryStore;

    fn doctor_with(entries: Vec<(&str, &str)>) -> DoctorService {
        let store = Arc::new(MemoryStore::with_entries(entries));
        DoctorService::new(Arc::new(KvRepository::new(store)))
    }

    const ANA: &str = r#"[{"name":"Ana","email":"Ana@x.com","password":"1234"}]"#;

    #[test]
    fn test_healthy_store() {
        let doctor = doctor_with(vec![
            ("aw_users", ANA),
            ("aw_current_user", "ana@x.com"),
            ("aw_balance_ana@x.com", "250000"),
            ("aw_transactions_ana@x.com", "[]"),
            ("aw_contacts_ana@x.com", "[]"),
        ]);
        let result = doctor.run_checks().unwrap();
        assert_eq!(result.summary.errors, 0);
        assert_eq!(result.summary.warnings, 0);
        assert_eq!(result.summary.passed, result.checks.len());
    }

    #[test]
    fn test_corrupt_records_reported() {
        let doctor = doctor_with(vec![
            ("aw_users", ANA),
            ("aw_balance_ana@x.com", "abc"),
            ("aw_transactions_ana@x.com", "{"),
            ("aw_contacts_ana@x.com", "[]"),
        ]);
        let result = doctor.run_checks().unwrap();
        assert_eq!(result.checks["balances"].status, CheckStatus::Error);
        assert_eq!(result.checks["transactions"].status, CheckStatus::Error);
        assert_eq!(result.checks["contacts"].status, CheckStatus::Pass);
        assert_eq!(result.summary.errors, 2);
    }

    #[test]
    fn test_unreadable_user_list() {
        let doctor = doctor_with(vec![("aw_users", "nope")]);
        let result = doctor.run_checks().unwrap();
        assert_eq!(result.checks["users"].status, CheckStatus::Error);
    }

    #[test]
    fn test_orphans_and_stale_session() {
        let doctor = doctor_with(vec![
            ("aw_users", ANA),
            ("aw_current_user", "ghost@x.com"),
            ("aw_balance_ana@x.com", "1"),
            ("aw_balance_ghost@x.com", "1"),
        ]);
        let result = doctor.run_checks().unwrap();
        assert_eq!(result.checks["session"].status, CheckStatus::Warning);
        assert_eq!(result.checks["orphaned_records"].status, CheckStatus::Warning);
        let details = result.checks["orphaned_records"].details.as_ref().unwrap();
        assert_eq!(details[0]["key"], "aw_balance_ghost@x.com");
    }
}
