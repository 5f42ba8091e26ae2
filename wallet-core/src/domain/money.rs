//! Amount parsing and currency display

use super::result::{Error, Result};

/// Parse a user-entered amount.
///
/// Accepts whole positive numbers. Anything that is not a finite number, is
/// zero or negative, or carries a fractional part is a validation error:
/// balances are kept in whole currency units.
pub fn parse_amount(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Enter an amount greater than 0"));
    }

    let amount = match trimmed.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            let value: f64 = trimmed
                .parse()
                .map_err(|_| Error::validation(format!("'{}' is not a number", trimmed)))?;
            if !value.is_finite() {
                return Err(Error::validation("Amount must be a finite number"));
            }
            if value.fract() != 0.0 {
                return Err(Error::validation("Amount must be a whole number"));
            }
            if value.abs() >= i64::MAX as f64 {
                return Err(Error::validation("Amount is too large"));
            }
            value as i64
        }
    };

    ensure_positive(amount)?;
    Ok(amount)
}

/// Reject zero and negative amounts
pub fn ensure_positive(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(Error::validation("Enter an amount greater than 0"));
    }
    Ok(())
}

/// Format an amount with `.` thousands grouping and no decimals: `$250.000`
pub fn format_currency(amount: i64, symbol: &str) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{}{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}

/// Format a signed transaction amount: `+ $50.000` / `- $30.000`
pub fn format_signed(amount: i64, symbol: &str) -> String {
    let sign = if amount >= 0 { "+" } else { "-" };
    format!("{} {}", sign, format_currency(amount.saturating_abs(), symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_amounts() {
        assert_eq!(parse_amount("50000").unwrap(), 50000);
        assert_eq!(parse_amount("  1 ").unwrap(), 1);
        assert_eq!(parse_amount("2500.0").unwrap(), 2500);
        assert_eq!(parse_amount("1e3").unwrap(), 1000);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for input in ["", "abc", "0", "-5", "12.5", "inf", "NaN", "1e30"] {
            assert!(
                matches!(parse_amount(input), Err(Error::Validation(_))),
                "expected validation error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(0, "$"), "$0");
        assert_eq!(format_currency(999, "$"), "$999");
        assert_eq!(format_currency(1000, "$"), "$1.000");
        assert_eq!(format_currency(250000, "$"), "$250.000");
        assert_eq!(format_currency(1234567, "$"), "$1.234.567");
        assert_eq!(format_currency(-30000, "$"), "-$30.000");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(50000, "$"), "+ $50.000");
        assert_eq!(format_signed(-30000, "$"), "- $30.000");
    }
}
