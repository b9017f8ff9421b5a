//! Error types for mab

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot build a balance timeline without transactions")]
    EmptyTimelineInput,

    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("transactions out of date order at index {index}: {date} follows {previous}")]
    UnorderedTransactions {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("transaction on {date} carries both a debit and a credit")]
    ConflictingMovement { date: NaiveDate },

    #[error("negative amount on {date}: {amount}")]
    NegativeAmount { date: NaiveDate, amount: f64 },

    #[error("invalid month key: {0}")]
    InvalidMonth(String),

    #[error("statement header not found ({lines} lines scanned)")]
    HeaderNotFound { lines: usize },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
