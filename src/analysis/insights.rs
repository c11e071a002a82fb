use super::necessity::NecessityProfile;
use super::summary::Totals;
use crate::config::Thresholds;
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insight {
    NoIncome { expense: Decimal },
    ExpensesExceedIncome { deficit: Decimal },
    HighExpenseRatio { ratio: Decimal, threshold: Decimal },
    LowNecessitySpending { share: Decimal, cutoff: u8 },
    Healthy { ratio: Decimal },
}

impl Insight {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Insight::Healthy { .. })
    }
}

fn percent(fraction: Decimal) -> Decimal {
    (fraction * Decimal::ONE_HUNDRED).round_dp(1)
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::NoIncome { expense } => write!(
                f,
                "No income recorded, but {} was spent.",
                expense.round_dp(2)
            ),
            Insight::ExpensesExceedIncome { deficit } => write!(
                f,
                "Expenses exceed income by {}. Review your spending.",
                deficit.round_dp(2)
            ),
            Insight::HighExpenseRatio { ratio, threshold } => write!(
                f,
                "Expenses are {}% of income (limit {}%). Try to reduce spending.",
                percent(*ratio),
                percent(*threshold)
            ),
            Insight::LowNecessitySpending { share, cutoff } => write!(
                f,
                "{}% of rated spending is on expenses rated {} or lower.",
                percent(*share),
                cutoff
            ),
            Insight::Healthy { ratio } => write!(
                f,
                "Spending is under control: expenses are {}% of income.",
                percent(*ratio)
            ),
        }
    }
}

/// Threshold checks over the aggregates. Empty data yields no insights.
pub fn insights(totals: &Totals, profile: &NecessityProfile, thresholds: &Thresholds) -> Vec<Insight> {
    let mut found = Vec::new();
    if totals.income.is_zero() && totals.expense.is_zero() {
        return found;
    }

    let ratio = totals.expense_ratio();
    if totals.income.is_zero() {
        found.push(Insight::NoIncome {
            expense: totals.expense,
        });
    } else if totals.expense > totals.income {
        found.push(Insight::ExpensesExceedIncome {
            deficit: totals.expense - totals.income,
        });
    } else if ratio > thresholds.expense_ratio_threshold {
        found.push(Insight::HighExpenseRatio {
            ratio,
            threshold: thresholds.expense_ratio_threshold,
        });
    }

    let share = profile.low_necessity_share(thresholds.low_necessity_rating);
    if share > thresholds.low_necessity_share {
        found.push(Insight::LowNecessitySpending {
            share,
            cutoff: thresholds.low_necessity_rating,
        });
    }

    if found.is_empty() {
        found.push(Insight::Healthy { ratio });
    }
    found
}
