//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed, missing or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("An account with email {0} already exists")]
    DuplicateAccount(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: i64, available: i64 },

    /// No user is logged in
    #[error("Not logged in")]
    NotAuthenticated,

    /// A stored record exists but cannot be decoded
    #[error("Corrupt record '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a corrupt record error
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::CorruptRecord {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by what the user typed or chose, as opposed
    /// to failures of the store underneath.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::DuplicateAccount(_)
                | Self::NotFound(_)
                | Self::InvalidCredentials
                | Self::InsufficientFunds { .. }
                | Self::NotAuthenticated
        )
    }

    /// Stable snake_case name of the variant. Safe to log: carries no user data.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateAccount(_) => "duplicate_account",
            Self::NotFound(_) => "not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::NotAuthenticated => "not_authenticated",
            Self::CorruptRecord { .. } => "corrupt_record",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }
}

impl From<duckdb::Error> for Error {
    fn from(e: duckdb::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Attach a context value
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
