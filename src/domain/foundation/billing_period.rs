//! Billing period value object.
//!
//! Quotas accumulate per calendar month (UTC) and reset at rollover.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

/// A calendar month in UTC, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    /// Creates a period, validating the month number.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::out_of_range("month", 1, 12, month as u64));
        }
        Ok(Self { year, month })
    }

    /// The period containing the current moment.
    pub fn current() -> Self {
        Self::from_timestamp(&Timestamp::now())
    }

    /// The period containing the given timestamp.
    pub fn from_timestamp(ts: &Timestamp) -> Self {
        let dt = ts.as_datetime();
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The period that follows this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| ValidationError::invalid_format("period", "expected YYYY-MM"))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(ValidationError::invalid_format("period", "expected YYYY-MM"));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| ValidationError::invalid_format("period", "year is not a number"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ValidationError::invalid_format("period", "month is not a number"))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for BillingPeriod {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BillingPeriod> for String {
    fn from(period: BillingPeriod) -> Self {
        period.to_string()
    }
}
