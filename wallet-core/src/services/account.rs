//! Account service - registration and authentication

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{User, MIN_PASSWORD_LEN};
use crate::ports::Repository;

use super::recover;

/// Account directory: registered users keyed by case-insensitive email
pub struct AccountService {
    repository: Arc<dyn Repository>,
    initial_balance: i64,
}

impl AccountService {
    pub fn new(repository: Arc<dyn Repository>, initial_balance: i64) -> Self {
        Self {
            repository,
            initial_balance,
        }
    }

    /// Register a new user
    ///
    /// Inputs are trimmed before validation. When `confirmation` is given it
    /// must equal the password. On success the user is stored together with
    /// an opening balance and empty transaction and contact lists.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirmation: Option<&str>,
    ) -> Result<User> {
        let name = name.trim();
        let email = email.trim();
        let password = password.trim();
        let confirmation = confirmation.map(str::trim);

        if name.is_empty()
            || email.is_empty()
            || password.is_empty()
            || confirmation.is_some_and(str::is_empty)
        {
            return Err(Error::validation("Fill in every field"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if confirmation.is_some_and(|c| c != password) {
            return Err(Error::validation("Passwords do not match"));
        }

        let mut users = recover(self.repository.users())?;
        if users.iter().any(|u| u.has_email(email)) {
            return Err(Error::DuplicateAccount(email.to_string()));
        }

        let user = User::new(name, email, password);
        users.push(user.clone());
        self.repository.save_users(&users)?;

        let key = user.key();
        self.repository.set_balance(&key, self.initial_balance)?;
        self.repository.save_transactions(&key, &[])?;
        self.repository.save_contacts(&key, &[])?;

        Ok(user)
    }

    /// Check credentials and return the matching user
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::validation("Enter email and password"));
        }

        let user = self
            .find_user(email)?
            .ok_or_else(|| Error::not_found(format!("No account registered for {}", email)))?;

        if !user.password_matches(password) {
            return Err(Error::InvalidCredentials);
        }
        Ok(user)
    }

    /// Case-insensitive lookup by email
    pub fn find_user(&self, email: &str) -> Result<Option<User>> {
        let users = recover(self.repository.users())?;
        Ok(users.into_iter().find(|u| u.has_email(email)))
    }
}
