//! Domain records for the Vihara admin backend.
//!
//! Everything here is pure: validation and aggregation over values the
//! data-access layer has already loaded. No I/O, no locking.
//!
//! # Key types
//!
//! - [`Transaction`] / [`TransactionDraft`] / [`TransactionPatch`]: income
//!   and expense entries with up to [`MAX_IMAGES`] receipt URLs
//! - [`TransactionFilter`] / [`FinanceSummary`]: the finance dashboard
//! - [`Registration`] / [`RegistrationDraft`]: retreat sign-ups
//! - [`ChantingStatus`] / [`ChantingSummary`]: per-registrant progress
//! - [`DashboardSummary`]: the admin home page figures
//! - [`ActivityLog`] / [`DeviceLog`]: append-only audit records

mod audit;
mod chanting;
mod dashboard;
mod error;
mod registration;
mod summary;
mod transaction;

pub use audit::{mask_ip, ActivityLog, DeviceLog, DeviceLogDraft, TransactionEvent};
pub use chanting::{ChantingStatus, ChantingSummary};
pub use dashboard::{BalanceSheet, DashboardSummary, LogCounts};
pub use error::LedgerError;
pub use registration::{NewRegistration, Registration, RegistrationDraft};
pub use summary::{format_baht, CategoryTotal, FinanceSummary, FinanceTotals, TransactionFilter};
pub use transaction::{
    NewTransaction, Transaction, TransactionDraft, TransactionKind, TransactionPatch, DATE_FORMAT,
    MAX_IMAGES,
};
