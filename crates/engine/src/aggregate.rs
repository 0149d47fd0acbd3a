//! Derived views over the transaction list.
//!
//! Every function here is pure: pass the full collection and the day to treat
//! as "today", get a fresh result back. Nothing is cached between calls.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{Category, Transaction, money::round_cents};

/// Number of months in [`monthly_expenses`].
pub const MONTHS_IN_SERIES: u32 = 12;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Expense total for one calendar month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
    /// `MMM yyyy`, e.g. `Oct 2026`.
    pub label: String,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Income and expenses for the month containing "today".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
}

/// Expense totals for the twelve calendar months ending with `today`'s
/// month, oldest first. Months without expenses report `0`.
pub fn monthly_expenses(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthlyBucket> {
    (0..MONTHS_IN_SERIES)
        .rev()
        .map(|back| {
            let (year, month) = months_before(today.year(), today.month(), back);
            let total = transactions
                .iter()
                .filter(|tx| tx.is_expense() && tx.date.year() == year && tx.date.month() == month)
                .fold(0.0, |sum, tx| sum + tx.amount);
            MonthlyBucket {
                year,
                month,
                label: month_label(year, month),
                amount: round_cents(total),
            }
        })
        .collect()
}

/// Expense totals per category, in order of first appearance.
///
/// Categories without expenses are left out rather than reported as `0`.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        match totals.iter_mut().find(|row| row.category == tx.category) {
            Some(row) => row.amount += tx.amount,
            None => totals.push(CategoryTotal {
                category: tx.category,
                amount: tx.amount,
            }),
        }
    }

    totals
        .into_iter()
        .map(|row| CategoryTotal {
            amount: round_cents(row.amount),
            ..row
        })
        .filter(|row| row.amount != 0.0)
        .collect()
}

/// Totals for `today`'s calendar month. Sums are left unrounded.
pub fn month_totals(transactions: &[Transaction], today: NaiveDate) -> MonthTotals {
    let (total_income, total_expenses) = transactions
        .iter()
        .filter(|tx| tx.date.year() == today.year() && tx.date.month() == today.month())
        .fold((0.0, 0.0), |(income, expenses), tx| {
            if tx.is_income() {
                (income + tx.amount, expenses)
            } else {
                (income, expenses + tx.amount)
            }
        });

    MonthTotals {
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
    }
}

fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn month_label(year: i32, month: u32) -> String {
    let name = MONTH_ABBR
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("???");
    format!("{name} {year}")
}
