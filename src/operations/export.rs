use super::search::{TransactionFilter, search_transactions};
use crate::error::FinanceResult;
use crate::models::transaction::Transaction;
use crate::storage::csv_ledger::write_transactions_to_path;
use std::path::Path;
use tracing::info;

/// Writes the matching transactions to `path` in the canonical ledger layout.
pub fn export_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    path: &Path,
) -> FinanceResult<usize> {
    let selected: Vec<Transaction> = search_transactions(filter, transactions)
        .into_iter()
        .map(|(_, transaction)| transaction.clone())
        .collect();

    write_transactions_to_path(path, &selected)?;
    info!(target_file = %path.display(), count = selected.len(), "transactions exported");
    Ok(selected.len())
}
