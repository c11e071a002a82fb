use crate::error::FinanceResult;
use crate::models::transaction::Transaction;
use crate::storage::csv_ledger::Ledger;
use tracing::info;

/// Deletes the transaction at 1-based `row` (as shown by `list`) and saves.
pub fn remove_transaction_from_ledger(ledger: &mut Ledger, row: usize) -> FinanceResult<Transaction> {
    let removed = ledger.remove(row)?;
    ledger.save()?;
    info!(row, description = %removed.description, "transaction removed");
    Ok(removed)
}
