//! Income and expense transactions.
//!
//! Request bodies arrive as a [`TransactionDraft`] (create) or a
//! [`TransactionPatch`] (update). Both are validated here before anything
//! reaches storage; a [`Transaction`] that exists is always well-formed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vihara_protocol::{StringArray, UserId};

use crate::LedgerError;

/// Maximum receipt images per transaction.
pub const MAX_IMAGES: usize = 5;

/// Wire format of transaction dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// TransactionKind
// ---------------------------------------------------------------------------

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::InvalidKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A stored transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_urls: StringArray,
    /// The administrator who recorded it.
    pub user_id: UserId,
}

/// A validated transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub category: String,
    pub image_urls: StringArray,
    pub user_id: UserId,
}

impl NewTransaction {
    /// Attaches the id the storage layer assigned.
    pub fn with_id(self, id: u64) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            date: self.date,
            category: self.category,
            image_urls: self.image_urls,
            user_id: self.user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionDraft: create request body
// ---------------------------------------------------------------------------

/// The body of a "create transaction" request, as sent by the frontend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub description: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl TransactionDraft {
    /// Validates the draft on behalf of `user_id`.
    ///
    /// Checks, in order: type, amount, description, date, image count.
    /// The first failure is returned.
    pub fn validate(self, user_id: UserId) -> Result<NewTransaction, LedgerError> {
        let kind: TransactionKind = self.kind.parse()?;
        if self.amount.is_nan() || self.amount <= 0.0 {
            return Err(LedgerError::NonPositiveAmount(self.amount));
        }
        if self.description.is_empty() {
            return Err(LedgerError::MissingDescription);
        }
        let date = parse_date(&self.date)?;
        check_image_count(self.image_urls.len())?;

        Ok(NewTransaction {
            kind,
            amount: self.amount,
            description: self.description,
            date,
            category: self.category,
            image_urls: StringArray::from(self.image_urls),
            user_id,
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionPatch: update request body
// ---------------------------------------------------------------------------

/// The body of an "update transaction" request.
///
/// Fields left empty (or `0` for the amount) keep their current value.
/// `image_urls` replaces the whole list when present, including with an
/// empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

impl TransactionPatch {
    /// Applies the patch to `tx`.
    ///
    /// Everything is validated before anything is written, so on error
    /// `tx` is left untouched.
    pub fn apply(self, tx: &mut Transaction) -> Result<(), LedgerError> {
        let kind = match self.kind.as_str() {
            "" => None,
            other => Some(other.parse::<TransactionKind>()?),
        };
        let date = match self.date.as_str() {
            "" => None,
            other => Some(parse_date(other)?),
        };
        if let Some(urls) = &self.image_urls {
            check_image_count(urls.len())?;
        }

        if let Some(kind) = kind {
            tx.kind = kind;
        }
        if let Some(date) = date {
            tx.date = date;
        }
        if self.amount > 0.0 {
            tx.amount = self.amount;
        }
        if !self.description.is_empty() {
            tx.description = self.description;
        }
        if !self.category.is_empty() {
            tx.category = self.category;
        }
        if let Some(urls) = self.image_urls {
            tx.image_urls = StringArray::from(urls);
        }
        Ok(())
    }
}

pub(crate) fn parse_date(text: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(text.to_string()))
}

fn check_image_count(count: usize) -> Result<(), LedgerError> {
    if count > MAX_IMAGES {
        tracing::debug!(count, "transaction rejected: too many images");
        return Err(LedgerError::TooManyImages {
            count,
            max: MAX_IMAGES,
        });
    }
    Ok(())
}
