//! Session domain model

use serde::{Deserialize, Serialize};

use super::user::normalize_email;

/// Identity of the logged-in user, handed to every ledger and contact operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    email: String,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }

    /// Email as it was stored at login
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Lower-cased email used to address per-user records
    pub fn key(&self) -> String {
        normalize_email(&self.email)
    }
}
