//! Transaction domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::result::Error;

/// Timestamp layout shown in the transaction list (es-CL style)
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y, %H:%M";

/// Kind of balance-affecting event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Send,
    Receive,
    Withdraw,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Send => "send",
            TransactionKind::Receive => "receive",
            TransactionKind::Withdraw => "withdraw",
        }
    }

    /// Whether this kind moves money out of the wallet
    pub fn is_outflow(&self) -> bool {
        matches!(self, TransactionKind::Send | TransactionKind::Withdraw)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(TransactionKind::Deposit),
            "send" => Ok(TransactionKind::Send),
            "receive" => Ok(TransactionKind::Receive),
            "withdraw" => Ok(TransactionKind::Withdraw),
            other => Err(Error::validation(format!(
                "Unknown transaction kind '{}' (expected deposit, send, receive or withdraw)",
                other
            ))),
        }
    }
}

/// An immutable record of one balance-affecting event
///
/// `amount` is signed: outflows are negative, inflows positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub title: String,
    pub amount: i64,
    pub timestamp: String,
}

impl Transaction {
    /// Build a transaction for `kind`, signing `amount` by direction
    pub fn new(kind: TransactionKind, title: impl Into<String>, amount: i64, at: DateTime<Local>) -> Self {
        let magnitude = amount.abs();
        Self {
            kind,
            title: title.into(),
            amount: if kind.is_outflow() { -magnitude } else { magnitude },
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn deposit(amount: i64, at: DateTime<Local>) -> Self {
        Self::new(TransactionKind::Deposit, "Deposit", amount, at)
    }

    pub fn withdraw(amount: i64, at: DateTime<Local>) -> Self {
        Self::new(TransactionKind::Withdraw, "Withdrawal", amount, at)
    }

    pub fn send(recipient: &str, amount: i64, at: DateTime<Local>) -> Self {
        Self::new(TransactionKind::Send, format!("Transfer to {}", recipient), amount, at)
    }

    pub fn receive(sender: &str, amount: i64, at: DateTime<Local>) -> Self {
        Self::new(TransactionKind::Receive, format!("Received from {}", sender), amount, at)
    }

    pub fn is_inflow(&self) -> bool {
        self.amount >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap()
    }

    #[test]
    fn test_outflows_are_negative() {
        assert_eq!(Transaction::withdraw(30000, fixed_time()).amount, -30000);
        assert_eq!(Transaction::send("Bob", 1000, fixed_time()).amount, -1000);
        assert_eq!(Transaction::deposit(50000, fixed_time()).amount, 50000);
        assert_eq!(Transaction::receive("Bob", 10, fixed_time()).amount, 10);
    }

    #[test]
    fn test_titles_mention_counterparty() {
        assert_eq!(Transaction::send("Bob", 1, fixed_time()).title, "Transfer to Bob");
        assert_eq!(Transaction::receive("Eve", 1, fixed_time()).title, "Received from Eve");
    }

    #[test]
    fn test_timestamp_format() {
        let tx = Transaction::deposit(1, fixed_time());
        assert_eq!(tx.timestamp, "07-03-2025, 09:05");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let tx = Transaction::withdraw(5, fixed_time());
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["kind"], "withdraw");
        assert_eq!(json["amount"], -5);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Deposit".parse::<TransactionKind>().unwrap(), TransactionKind::Deposit);
        assert_eq!(" send ".parse::<TransactionKind>().unwrap(), TransactionKind::Send);
        assert!(matches!(
            "refund".parse::<TransactionKind>(),
            Err(Error::Validation(_))
        ));
    }
}
