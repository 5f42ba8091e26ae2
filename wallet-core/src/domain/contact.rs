//! Contact domain model

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{Error, Result};

/// Minimum number of digits in a payee account number
pub const MIN_ACCOUNT_NUMBER_LEN: usize = 10;

static ACCOUNT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("account number pattern is valid"));

/// A saved payee
///
/// The id is assigned when the contact is stored and never changes, so a
/// transfer can refer to a contact regardless of how a list is filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub bank: String,
}

impl Contact {
    /// Case-insensitive substring match on name or alias.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .alias
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(needle))
    }

    /// Label used in pickers: `Name (Bank - alias)`
    pub fn label(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} ({} - {})", self.name, self.bank, alias),
            None => format!("{} ({})", self.name, self.bank),
        }
    }
}

/// Contact fields as entered by the user, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub account_number: String,
    pub alias: Option<String>,
    pub bank: String,
}

impl NewContact {
    pub fn new(
        name: impl Into<String>,
        account_number: impl Into<String>,
        bank: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            account_number: account_number.into(),
            alias: None,
            bank: bank.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Trim and validate every field, producing a stored contact with a fresh id.
    ///
    /// All problems are reported together so a form can flag each field.
    pub fn validate(self) -> Result<Contact> {
        let name = self.name.trim().to_string();
        let account_number = self.account_number.trim().to_string();
        let bank = self.bank.trim().to_string();
        let alias = self
            .alias
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let mut problems = Vec::new();
        if name.is_empty() {
            problems.push("name is required".to_string());
        }
        if bank.is_empty() {
            problems.push("bank is required".to_string());
        }
        if !is_valid_account_number(&account_number) {
            problems.push(format!(
                "account number must be digits only, at least {} long",
                MIN_ACCOUNT_NUMBER_LEN
            ));
        }
        if !problems.is_empty() {
            return Err(Error::validation(problems.join("; ")));
        }

        Ok(Contact {
            id: Uuid::new_v4(),
            name,
            account_number,
            alias,
            bank,
        })
    }
}

/// Digits only, at least [`MIN_ACCOUNT_NUMBER_LEN`] of them
pub fn is_valid_account_number(value: &str) -> bool {
    ACCOUNT_NUMBER_RE.is_match(value) && value.len() >= MIN_ACCOUNT_NUMBER_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contact() {
        let contact = NewContact::new(" Bob ", "1234567890", "Banco Estado")
            .with_alias("bobby")
            .validate()
            .unwrap();
        assert_eq!(contact.name, "Bob");
        assert_eq!(contact.alias.as_deref(), Some("bobby"));
        assert_eq!(contact.label(), "Bob (Banco Estado - bobby)");
    }

    #[test]
    fn test_short_account_number_rejected() {
        let err = NewContact::new("Bob", "12345", "Banco").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("account number")));
    }

    #[test]
    fn test_account_number_must_be_ascii_digits() {
        assert!(is_valid_account_number("0000000000"));
        assert!(!is_valid_account_number("12345-67890"));
        assert!(!is_valid_account_number("١٢٣٤٥٦٧٨٩٠١"));
        assert!(!is_valid_account_number(""));
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let err = NewContact::new("", "1234567890", " ").validate().unwrap_err();
        let Error::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("name"));
        assert!(msg.contains("bank"));
    }

    #[test]
    fn test_blank_alias_dropped() {
        let contact = NewContact::new("Bob", "1234567890", "Banco")
            .with_alias("  ")
            .validate()
            .unwrap();
        assert_eq!(contact.alias, None);
        assert_eq!(contact.label(), "Bob (Banco)");
    }

    #[test]
    fn test_matches_name_or_alias() {
        let contact = NewContact::new("Roberto", "1234567890", "Banco")
            .with_alias("Bob")
            .validate()
            .unwrap();
        assert!(contact.matches("rob"));
        assert!(contact.matches("bob"));
        assert!(!contact.matches("ana"));
    }
}
