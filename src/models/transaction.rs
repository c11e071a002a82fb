use super::rating::NecessityRating;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

pub const MAX_DESCRIPTION_LEN: usize = 255;
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;
/// Smallest accepted amount (one cent).
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Largest accepted amount. Keeps every sum, ratio and percentage over a
/// ledger well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Accepts the ledger's own labels as well as the English names.
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_lowercase().as_str() {
            "ingreso" | "income" => Ok(TransactionType::Income),
            "gasto" | "expense" => Ok(TransactionType::Expense),
            other => Err(format!(
                "Invalid transaction type '{}'. Use 'Ingreso'/'income' or 'Gasto'/'expense'.",
                other
            )),
        }
    }

    /// Label written to the ledger file.
    pub fn ledger_label(self) -> &'static str {
        match self {
            TransactionType::Income => "Ingreso",
            TransactionType::Expense => "Gasto",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub description: String,
    pub amount: Decimal,
    pub payment_method: String,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub rating: Option<NecessityRating>,
}

impl Transaction {
    pub fn new(
        description: String,
        amount: Decimal,
        payment_method: String,
        date: NaiveDate,
        transaction_type: TransactionType,
        rating: Option<NecessityRating>,
    ) -> Self {
        Self {
            description,
            amount,
            payment_method,
            date,
            transaction_type,
            rating,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

pub fn parse_description(raw: &str) -> Result<String, String> {
    let description = raw.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err("Description too long".to_string());
    }
    Ok(description.to_string())
}

pub fn parse_payment_method(raw: &str) -> Result<String, String> {
    let method = raw.trim();
    if method.is_empty() {
        return Err("Payment method cannot be empty".to_string());
    }
    if method.chars().count() > MAX_PAYMENT_METHOD_LEN {
        return Err("Payment method too long".to_string());
    }
    Ok(method.to_string())
}

/// Parses an amount between [`MIN_AMOUNT`] and [`MAX_AMOUNT`]. A leading `$`
/// and `,` thousands separators are tolerated.
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let amount = Decimal::from_str(&cleaned).map_err(|_| {
        format!(
            "Invalid amount format {}. Please provide a valid decimal number.",
            raw.trim()
        )
    })?;

    if amount <= Decimal::ZERO {
        return Err(format!("Amount must be positive, got {}", amount));
    }
    if amount < MIN_AMOUNT {
        return Err(format!("Amount must be at least {}, got {}", MIN_AMOUNT, amount));
    }
    if amount > MAX_AMOUNT {
        return Err(format!("Amount must not exceed {}, got {}", MAX_AMOUNT, amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_spanish_and_english() {
        assert_eq!(TransactionType::parse("Ingreso").unwrap(), TransactionType::Income);
        assert_eq!(TransactionType::parse("GASTO").unwrap(), TransactionType::Expense);
        assert_eq!(TransactionType::parse(" income ").unwrap(), TransactionType::Income);
        assert_eq!(TransactionType::parse("expense").unwrap(), TransactionType::Expense);
    }

    #[test]
    fn test_parse_type_invalid() {
        let err = TransactionType::parse("transfer").unwrap_err();
        assert!(err.contains("Invalid transaction type"));
    }

    #[test]
    fn test_parse_amount_plain_and_decorated() {
        assert_eq!(parse_amount("12.50").unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount(" $1,234.00 ").unwrap(), Decimal::new(123400, 2));
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        assert!(parse_amount("0").unwrap_err().contains("must be positive"));
        assert!(parse_amount("-3.20").unwrap_err().contains("must be positive"));
    }

    #[test]
    fn test_parse_amount_bounds() {
        assert_eq!(MAX_AMOUNT, Decimal::new(1_000_000_000_000, 0));
        assert_eq!(parse_amount("0.01").unwrap(), MIN_AMOUNT);
        assert_eq!(parse_amount("1,000,000,000,000").unwrap(), MAX_AMOUNT);
        assert!(parse_amount("0.001").unwrap_err().contains("at least 0.01"));
        assert!(
            parse_amount("79228162514264337593543950335")
                .unwrap_err()
                .contains("must not exceed")
        );
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("ten").unwrap_err().contains("Invalid amount format"));
    }

    #[test]
    fn test_parse_description_too_long() {
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(parse_description(&long).unwrap_err(), "Description too long");
        assert_eq!(parse_description("  Rent ").unwrap(), "Rent");
    }

    #[test]
    fn test_parse_payment_method_empty() {
        assert!(parse_payment_method("   ").is_err());
        assert_eq!(parse_payment_method(" efectivo ").unwrap(), "efectivo");
    }
}
