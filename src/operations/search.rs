use crate::models::transaction::{Transaction, TransactionType};
use crate::storage::dates::DateRange;
use std::fmt::Write;

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub payment_method: Option<String>,
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let type_ok = self
            .transaction_type
            .is_none_or(|kind| transaction.transaction_type == kind);
        let method_ok = self.payment_method.as_ref().is_none_or(|method| {
            transaction.payment_method.to_lowercase() == method.trim().to_lowercase()
        });
        type_ok && method_ok && self.range.contains(transaction.date)
    }
}

/// Matching transactions paired with their 1-based ledger row.
pub fn search_transactions<'a>(
    filter: &TransactionFilter,
    transactions: &'a [Transaction],
) -> Vec<(usize, &'a Transaction)> {
    transactions
        .iter()
        .enumerate()
        .filter(|(_, transaction)| filter.matches(transaction))
        .map(|(idx, transaction)| (idx + 1, transaction))
        .collect()
}

pub fn render_transactions(rows: &[(usize, &Transaction)]) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("No transactions found.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>4}  {:10}  {:8}  {:>12}  {:15}  {:6}  {}",
        "#", "Date", "Type", "Amount", "Method", "Rating", "Description"
    );
    for (row, transaction) in rows {
        let rating = transaction
            .rating
            .map(|r| format!("{}/6", r))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:10}  {:8}  {:>12.2}  {:15}  {:6}  {}",
            row,
            transaction.date.format("%Y-%m-%d").to_string(),
            transaction.transaction_type.to_string(),
            transaction.amount,
            transaction.payment_method,
            rating,
            transaction.description
        );
    }
    out
}
