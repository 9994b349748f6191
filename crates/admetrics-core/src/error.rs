// crates/admetrics-core/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

/// Rejected query input. Empty selections are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("date range is inverted: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{0}")]
    UnknownPlatform(String),

    #[error("unknown bucket '{0}', expected day, week or month")]
    UnknownBucket(String),

    #[error("unknown campaign ranking '{0}', expected revenue or spend")]
    UnknownRanking(String),

    #[error("no default date range: the sources share no overlapping dates")]
    NoDateRange,
}

pub type Result<T> = std::result::Result<T, FilterError>;
