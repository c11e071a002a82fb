use crate::models::rating::NecessityRating;
use crate::models::transaction::Transaction;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingBucket {
    pub count: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NecessityProfile {
    pub rated: usize,
    pub unrated: usize,
    /// Index `i` holds expenses rated `i + 1`.
    pub buckets: [RatingBucket; NecessityRating::MAX as usize],
}

impl NecessityProfile {
    /// Mean rating over rated expenses, unweighted by amount.
    pub fn average(&self) -> Option<Decimal> {
        if self.rated == 0 {
            return None;
        }
        let sum: u64 = self
            .buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (i as u64 + 1) * b.count as u64)
            .sum();
        Some(Decimal::from(sum) / Decimal::from(self.rated as u64))
    }

    pub fn rated_total(&self) -> Decimal {
        self.buckets.iter().fold(Decimal::ZERO, |acc, b| acc + b.total)
    }

    /// Fraction of rated spending whose rating is at or below `cutoff`.
    pub fn low_necessity_share(&self, cutoff: u8) -> Decimal {
        let rated_total = self.rated_total();
        if rated_total <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let low: Decimal = self
            .buckets
            .iter()
            .take(cutoff as usize)
            .fold(Decimal::ZERO, |acc, b| acc + b.total);
        low / rated_total
    }
}

pub fn necessity_profile(transactions: &[Transaction]) -> NecessityProfile {
    let mut profile = NecessityProfile {
        rated: 0,
        unrated: 0,
        buckets: [RatingBucket::default(); NecessityRating::MAX as usize],
    };

    for expense in transactions.iter().filter(|t| t.is_expense()) {
        match expense.rating {
            Some(rating) => {
                let bucket = &mut profile.buckets[rating.value() as usize - 1];
                bucket.count += 1;
                bucket.total += expense.amount;
                profile.rated += 1;
            }
            None => profile.unrated += 1,
        }
    }
    profile
}
