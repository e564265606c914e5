//! The finance dashboard: filtering and aggregation over transactions.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::transaction::parse_date;
use crate::{Transaction, TransactionKind};

/// Narrows a transaction listing.
///
/// Every field is optional; `None` matches everything. Date bounds are
/// inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Builds a filter from raw query-string values.
    ///
    /// Lenient: an unknown type, an empty category or an unparseable date
    /// simply doesn't constrain the result.
    pub fn from_query(kind: &str, category: &str, start: &str, end: &str) -> Self {
        let lenient_date = |text: &str| {
            if text.is_empty() {
                return None;
            }
            let parsed = parse_date(text).ok();
            if parsed.is_none() {
                tracing::debug!(value = text, "ignoring unparseable date filter");
            }
            parsed
        };

        Self {
            kind: kind.parse().ok(),
            category: (!category.is_empty()).then(|| category.to_string()),
            start: lenient_date(start),
            end: lenient_date(end),
        }
    }

    /// The range from the first of `today`'s month up to `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start: today.with_day(1),
            end: Some(today),
            ..Self::default()
        }
    }

    /// Only the date bounds of this filter.
    pub fn date_range(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            ..Self::default()
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        if self.category.as_deref().is_some_and(|c| c != tx.category) {
            return false;
        }
        if self.start.is_some_and(|s| tx.date < s) {
            return false;
        }
        if self.end.is_some_and(|e| tx.date > e) {
            return false;
        }
        true
    }

    /// Returns the matching transactions, newest date first (ties broken
    /// by descending id).
    pub fn select<'a>(
        &self,
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Vec<&'a Transaction> {
        let mut selected: Vec<&Transaction> = transactions
            .into_iter()
            .filter(|tx| self.matches(tx))
            .collect();
        selected.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        selected
    }
}

/// Income and expense totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinanceTotals {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_amount: f64,
    pub income_count: u64,
    pub expense_count: u64,
}

/// Total and count for one `(category, type)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub total: f64,
    pub count: u64,
}

/// The finance summary response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinanceSummary {
    #[serde(rename = "summary")]
    pub totals: FinanceTotals,
    /// Ordered by category, then income before expense.
    pub categories: Vec<CategoryTotal>,
}

impl FinanceSummary {
    /// Aggregates every transaction matching `filter`.
    pub fn compute<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
        filter: &TransactionFilter,
    ) -> Self {
        let mut totals = FinanceTotals::default();
        let mut by_category: BTreeMap<(&str, TransactionKind), (f64, u64)> = BTreeMap::new();

        for tx in transactions.into_iter().filter(|tx| filter.matches(tx)) {
            match tx.kind {
                TransactionKind::Income => {
                    totals.total_income += tx.amount;
                    totals.income_count += 1;
                }
                TransactionKind::Expense => {
                    totals.total_expense += tx.amount;
                    totals.expense_count += 1;
                }
            }
            let entry = by_category
                .entry((tx.category.as_str(), tx.kind))
                .or_insert((0.0, 0));
            entry.0 += tx.amount;
            entry.1 += 1;
        }
        totals.net_amount = totals.total_income - totals.total_expense;

        let categories = by_category
            .into_iter()
            .map(|((category, kind), (total, count))| CategoryTotal {
                category: category.to_string(),
                kind,
                total,
                count,
            })
            .collect();

        Self { totals, categories }
    }
}

/// Renders an amount the way the audit log and UI show money: `฿1234.50`.
pub fn format_baht(amount: f64) -> String {
    format!("฿{amount:.2}")
}
