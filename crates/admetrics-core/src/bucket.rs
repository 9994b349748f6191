//! Calendar bucket mapping for trend aggregation.
//!
//! - Day: the date itself.
//! - Week: Monday-start weeks, keyed by the Monday.
//! - Month: calendar months, keyed by the first of the month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Time-bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Day,
    #[default]
    Week,
    Month,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Day, Bucket::Week, Bucket::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Day => "day",
            Bucket::Week => "week",
            Bucket::Month => "month",
        }
    }

    /// Start date of the bucket containing `date`.
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Day => date,
            Bucket::Week => {
                let offset = date.weekday().num_days_from_monday() as i64;
                date.checked_sub_signed(Duration::days(offset))
                    .unwrap_or(NaiveDate::MIN)
            }
            Bucket::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Start of the bucket following the one that starts at `start`.
    /// Saturates at `NaiveDate::MAX`.
    pub fn next(&self, start: NaiveDate) -> NaiveDate {
        let next = match self {
            Bucket::Day => start.checked_add_signed(Duration::days(1)),
            Bucket::Week => start.checked_add_signed(Duration::days(7)),
            Bucket::Month => start.checked_add_months(Months::new(1)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }

    /// Every bucket start from the bucket of `first` through the bucket of `last`, inclusive.
    pub fn span(&self, first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
        let end = self.start_of(last);
        let mut cursor = self.start_of(first);
        let mut starts = Vec::new();
        while cursor <= end {
            starts.push(cursor);
            let next = self.next(cursor);
            if next <= cursor {
                break;
            }
            cursor = next;
        }
        starts
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "d" | "daily" => Ok(Bucket::Day),
            "week" | "w" | "weekly" => Ok(Bucket::Week),
            "month" | "m" | "monthly" => Ok(Bucket::Month),
            other => Err(FilterError::UnknownBucket(other.to_string())),
        }
    }
}
