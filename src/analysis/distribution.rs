use crate::models::transaction::{Transaction, TransactionType};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentShare {
    pub method: String,
    pub count: usize,
    pub total: Decimal,
    /// Fraction of the grand total, 0 to 1.
    pub share: Decimal,
}

/// Groups transactions by payment method, case-insensitively. The first
/// spelling seen names the group. `only` restricts the input to one type.
pub fn payment_distribution(
    transactions: &[Transaction],
    only: Option<TransactionType>,
) -> Vec<PaymentShare> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut shares: Vec<PaymentShare> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|t| only.is_none_or(|kind| t.transaction_type == kind))
    {
        let key = transaction.payment_method.to_lowercase();
        let idx = *index.entry(key).or_insert_with(|| {
            shares.push(PaymentShare {
                method: transaction.payment_method.clone(),
                count: 0,
                total: Decimal::ZERO,
                share: Decimal::ZERO,
            });
            shares.len() - 1
        });
        shares[idx].count += 1;
        shares[idx].total += transaction.amount;
    }

    let grand_total = shares.iter().fold(Decimal::ZERO, |acc, s| acc + s.total);
    if grand_total > Decimal::ZERO {
        for share in &mut shares {
            share.share = share.total / grand_total;
        }
    }

    shares.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.method.cmp(&b.method)));
    shares
}
