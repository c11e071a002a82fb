use crate::analysis::distribution::{PaymentShare, payment_distribution};
use crate::analysis::insights::{Insight, insights};
use crate::analysis::necessity::{NecessityProfile, necessity_profile};
use crate::analysis::summary::{MonthlySummary, Totals, monthly_summary, totals};
use crate::config::Thresholds;
use crate::models::transaction::Transaction;
use rust_decimal::Decimal;
use std::fmt::Write;

pub struct ReportData {
    pub transaction_count: usize,
    pub totals: Totals,
    pub months: Vec<MonthlySummary>,
    pub payment_methods: Vec<PaymentShare>,
    pub necessity: NecessityProfile,
    pub insights: Vec<Insight>,
}

pub fn build_report(transactions: &[Transaction], thresholds: &Thresholds) -> ReportData {
    let totals = totals(transactions);
    let necessity = necessity_profile(transactions);
    let insights = insights(&totals, &necessity, thresholds);

    ReportData {
        transaction_count: transactions.len(),
        totals,
        months: monthly_summary(transactions),
        payment_methods: payment_distribution(transactions, None),
        necessity,
        insights,
    }
}

fn percent(fraction: Decimal) -> String {
    format!("{:.1}%", (fraction * Decimal::ONE_HUNDRED).round_dp(1))
}

pub fn render_report(title: &str, data: &ReportData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

    if data.transaction_count == 0 {
        out.push_str("No data available to analyse.\n");
        return out;
    }

    render_totals(&mut out, data);
    render_monthly_table(&mut out, &data.months);
    render_payment_table(&mut out, &data.payment_methods);
    render_necessity_table(&mut out, &data.necessity);
    render_insights(&mut out, &data.insights);
    out
}

fn render_totals(out: &mut String, data: &ReportData) {
    let _ = writeln!(out, "\nSummary ({} transactions)", data.transaction_count);
    let _ = writeln!(out, "  {:18}{:>14.2}", "Income", data.totals.income);
    let _ = writeln!(out, "  {:18}{:>14.2}", "Expenses", data.totals.expense);
    let _ = writeln!(out, "  {:18}{:>14.2}", "Balance", data.totals.balance());
    let _ = writeln!(
        out,
        "  {:18}{:>14}",
        "Expense ratio",
        percent(data.totals.expense_ratio())
    );
    let (income_share, expense_share) = data.totals.shares();
    let _ = writeln!(
        out,
        "  {:18}{:>14}",
        "Income share",
        percent(income_share)
    );
    let _ = writeln!(
        out,
        "  {:18}{:>14}",
        "Expense share",
        percent(expense_share)
    );
}

fn render_monthly_table(out: &mut String, months: &[MonthlySummary]) {
    let _ = writeln!(out, "\nMonthly summary");
    let _ = writeln!(
        out,
        "  {:8}  {:>12}  {:>12}  {:>12}",
        "Month", "Income", "Expenses", "Balance"
    );
    for month in months {
        let _ = writeln!(
            out,
            "  {:8}  {:>12.2}  {:>12.2}  {:>12.2}",
            month.month.to_string(),
            month.totals.income,
            month.totals.expense,
            month.totals.balance()
        );
    }
}

fn render_payment_table(out: &mut String, shares: &[PaymentShare]) {
    let _ = writeln!(out, "\nPayment methods");
    let _ = writeln!(
        out,
        "  {:15}  {:>5}  {:>12}  {:>7}",
        "Method", "Count", "Amount", "Share"
    );
    for share in shares {
        let _ = writeln!(
            out,
            "  {:15}  {:>5}  {:>12.2}  {:>7}",
            share.method,
            share.count,
            share.total,
            percent(share.share)
        );
    }
}

fn render_necessity_table(out: &mut String, profile: &NecessityProfile) {
    let _ = writeln!(out, "\nExpense necessity");
    match profile.average() {
        Some(average) => {
            let _ = writeln!(out, "  Average rating: {:.2} / 6", average);
        }
        None => {
            let _ = writeln!(out, "  Average rating: n/a");
        }
    }
    if profile.rated > 0 {
        let _ = writeln!(out, "  {:6}  {:>5}  {:>12}", "Rating", "Count", "Amount");
        for (idx, bucket) in profile.buckets.iter().enumerate() {
            if bucket.count == 0 {
                continue;
            }
            let _ = writeln!(out, "  {:6}  {:>5}  {:>12.2}", idx + 1, bucket.count, bucket.total);
        }
    }
    if profile.unrated > 0 {
        let _ = writeln!(out, "  Unrated expenses: {}", profile.unrated);
    }
}

fn render_insights(out: &mut String, found: &[Insight]) {
    let _ = writeln!(out, "\nInsights");
    for insight in found {
        let marker = if insight.is_warning() { "[!]" } else { "[ok]" };
        let _ = writeln!(out, "  {} {}", marker, insight);
    }
}
