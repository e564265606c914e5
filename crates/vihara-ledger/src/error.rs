//! Error types for the ledger layer.

/// Validation failures for transactions and registrations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The transaction type was neither `income` nor `expense`.
    #[error("invalid transaction type {0:?}: expected \"income\" or \"expense\"")]
    InvalidKind(String),

    /// Amounts must be strictly positive.
    #[error("amount must be greater than 0, got {0}")]
    NonPositiveAmount(f64),

    /// New transactions need a description.
    #[error("description is required")]
    MissingDescription,

    /// The date was not in `YYYY-MM-DD` form.
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A required registration field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The birth date was not in `YYYY-MM-DD` form.
    #[error("invalid birth date {0:?}: expected YYYY-MM-DD")]
    InvalidBirthDate(String),

    /// More receipt images than a transaction may carry.
    #[error("too many images: {count} (max {max})")]
    TooManyImages { count: usize, max: usize },
}
