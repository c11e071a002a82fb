use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::rating::NecessityRating;
use crate::models::transaction::{
    Transaction, TransactionType, parse_amount, parse_description, parse_payment_method,
};
use crate::storage::csv_ledger::Ledger;
use crate::storage::dates::parse_date;
use chrono::{Local, NaiveDate};
use tracing::info;

/// Raw field values for one transaction, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub transaction_type: String,
    pub description: String,
    pub amount: String,
    pub payment_method: String,
    pub date: Option<String>,
    pub rating: Option<String>,
}

pub fn create_transaction(input: &NewTransaction, today: NaiveDate) -> Result<Transaction, String> {
    let transaction_type = TransactionType::parse(&input.transaction_type)?;
    let description = parse_description(&input.description)?;
    let amount = parse_amount(&input.amount)?;
    let payment_method = parse_payment_method(&input.payment_method)?;

    let date = match input.date.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_date(raw)?,
        _ => today,
    };

    let rating = match input.rating.as_deref() {
        Some(raw) => NecessityRating::parse_cell(raw)?,
        None => None,
    };
    if rating.is_some() && transaction_type == TransactionType::Income {
        return Err("Necessity ratings only apply to expenses".to_string());
    }

    Ok(Transaction::new(
        description,
        amount,
        payment_method,
        date,
        transaction_type,
        rating,
    ))
}

#[derive(Debug)]
pub struct AddOutcome {
    pub transaction: Transaction,
    pub row: usize,
    /// Set when the payment method was not known before this entry.
    pub new_payment_method: bool,
}

/// Validates the entry, appends it to the ledger and saves. An unknown
/// payment method is added to `settings`; the caller persists settings.
pub fn add_transaction_to_ledger(
    ledger: &mut Ledger,
    settings: &mut Settings,
    input: &NewTransaction,
) -> FinanceResult<AddOutcome> {
    let transaction =
        create_transaction(input, Local::now().date_naive()).map_err(FinanceError::Validation)?;

    let new_payment_method = settings.add_payment_method(&transaction.payment_method);
    ledger.push(transaction.clone());
    ledger.save()?;
    info!(
        row = ledger.len(),
        kind = %transaction.transaction_type,
        amount = %transaction.amount,
        "transaction recorded"
    );

    Ok(AddOutcome {
        transaction,
        row: ledger.len(),
        new_payment_method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 9).unwrap()
    }

    fn expense(amount: &str) -> NewTransaction {
        NewTransaction {
            transaction_type: "expense".to_string(),
            description: "Groceries".to_string(),
            amount: amount.to_string(),
            payment_method: "efectivo".to_string(),
            date: Some("2025-11-01".to_string()),
            rating: Some("5".to_string()),
        }
    }

    #[test]
    fn test_create_transaction_success() {
        let tx = create_transaction(&expense("42.10"), today()).unwrap();
        assert_eq!(tx.amount, Decimal::new(4210, 2));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(tx.rating.unwrap().value(), 5);
    }

    #[test]
    fn test_create_transaction_defaults_date_to_today() {
        let mut input = expense("1");
        input.date = None;
        let tx = create_transaction(&input, today()).unwrap();
        assert_eq!(tx.date, today());
    }

    #[test]
    fn test_create_transaction_invalid_amount() {
        let err = create_transaction(&expense("abc"), today()).unwrap_err();
        assert!(err.contains("Invalid amount format"));
    }

    #[test]
    fn test_create_transaction_rating_on_income() {
        let mut input = expense("100");
        input.transaction_type = "income".to_string();
        let err = create_transaction(&input, today()).unwrap_err();
        assert_eq!(err, "Necessity ratings only apply to expenses");
    }

    #[test]
    fn test_create_transaction_rating_out_of_range() {
        let mut input = expense("100");
        input.rating = Some("7".to_string());
        assert!(create_transaction(&input, today()).unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_add_transaction_persists_and_registers_method() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let mut ledger = Ledger::open(&path).unwrap();
        let mut settings = Settings::default();

        let mut input = expense("12");
        input.payment_method = "tarjeta".to_string();
        let outcome = add_transaction_to_ledger(&mut ledger, &mut settings, &input).unwrap();

        assert_eq!(outcome.row, 1);
        assert!(outcome.new_payment_method);
        assert!(settings.knows_payment_method("tarjeta"));
        assert_eq!(Ledger::open(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_add_transaction_known_method_and_failure_leaves_ledger() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let mut ledger = Ledger::open(&path).unwrap();
        let mut settings = Settings::default();

        let outcome = add_transaction_to_ledger(&mut ledger, &mut settings, &expense("3")).unwrap();
        assert!(!outcome.new_payment_method);

        let err = add_transaction_to_ledger(&mut ledger, &mut settings, &expense("-3")).unwrap_err();
        assert!(matches!(err, FinanceError::Validation(_)));
        assert_eq!(Ledger::open(&path).unwrap().len(), 1);
    }
}
