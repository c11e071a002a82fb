use crate::models::transaction::{Transaction, TransactionType};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }

    /// Expenses per unit of income; zero when nothing was earned.
    pub fn expense_ratio(&self) -> Decimal {
        if self.income > Decimal::ZERO {
            self.expense / self.income
        } else {
            Decimal::ZERO
        }
    }

    /// Income and expense as fractions of everything that moved; both zero
    /// for an empty set.
    pub fn shares(&self) -> (Decimal, Decimal) {
        let combined = self.income + self.expense;
        if combined.is_zero() {
            return (Decimal::ZERO, Decimal::ZERO);
        }
        let income_share = self.income / combined;
        (income_share, Decimal::ONE - income_share)
    }

    fn add(&mut self, transaction: &Transaction) {
        match transaction.transaction_type {
            TransactionType::Income => self.income += transaction.amount,
            TransactionType::Expense => self.expense += transaction.amount,
        }
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for transaction in transactions {
        totals.add(transaction);
    }
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub totals: Totals,
}

/// One row per month from the first to the last month with activity; quiet
/// months in between are reported as zero.
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<YearMonth, Totals> = BTreeMap::new();
    for transaction in transactions {
        by_month
            .entry(YearMonth::of(transaction.date))
            .or_default()
            .add(transaction);
    }

    let (Some(first), Some(last)) = (
        by_month.keys().next().copied(),
        by_month.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut summaries = Vec::new();
    let mut month = first;
    while month <= last {
        summaries.push(MonthlySummary {
            month,
            totals: by_month.get(&month).copied().unwrap_or_default(),
        });
        month = month.next();
    }
    summaries
}
