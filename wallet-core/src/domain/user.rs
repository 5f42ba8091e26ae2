//! User domain model

use serde::{Deserialize, Serialize};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 4;

/// A registered wallet user
///
/// The password is kept in plain text. This is a demo wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Lower-cased email, the key for every per-user record
    pub fn key(&self) -> String {
        normalize_email(&self.email)
    }

    /// Case-insensitive email comparison
    pub fn has_email(&self, email: &str) -> bool {
        self.key() == normalize_email(email)
    }

    /// Exact, case-sensitive password check
    pub fn password_matches(&self, password: &str) -> bool {
        self.password.as_bytes() == password.as_bytes()
    }
}

/// Normalize an email for use as a storage key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
