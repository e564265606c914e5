//! The admin home page: one response combining registrations, money and
//! audit volume.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{ChantingSummary, FinanceSummary, Registration, Transaction, TransactionFilter};

/// All-time and month-to-date balances.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub income_this_month: f64,
    pub expense_this_month: f64,
    pub balance_this_month: f64,
}

impl BalanceSheet {
    /// `today` decides which month counts as "this month"; transactions
    /// dated after `today` are left out of the monthly figures.
    pub fn compute(transactions: &[Transaction], today: NaiveDate) -> Self {
        let all = FinanceSummary::compute(transactions, &TransactionFilter::default()).totals;
        let month =
            FinanceSummary::compute(transactions, &TransactionFilter::month_to_date(today)).totals;

        Self {
            total_income: all.total_income,
            total_expense: all.total_expense,
            balance: all.net_amount,
            income_this_month: month.total_income,
            expense_this_month: month.total_expense,
            balance_this_month: month.net_amount,
        }
    }
}

/// How many audit records exist. The storage layer counts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LogCounts {
    pub activity_logs: u64,
    pub device_logs: u64,
}

/// The dashboard response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub registrations: ChantingSummary,
    pub transactions: BalanceSheet,
    pub logs: LogCounts,
}

impl DashboardSummary {
    pub fn compute(
        registrations: &[Registration],
        transactions: &[Transaction],
        logs: LogCounts,
        today: NaiveDate,
    ) -> Self {
        let summary = Self {
            registrations: ChantingSummary::tally(registrations.iter().map(|r| &r.chanting)),
            transactions: BalanceSheet::compute(transactions, today),
            logs,
        };
        tracing::debug!(
            registrations = summary.registrations.total,
            transactions = transactions.len(),
            "dashboard summary computed"
        );
        summary
    }
}
