//! Time Index Attributes
//!
//! Extraction of scalar time components from a UTC index, plus the derived
//! quantities (minute of day, second of minute) that the cyclical encoder
//! consumes as descriptors.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A named scalar attribute of a time index
///
/// Each variant reads one numeric value per timestamp. `Week` is the ISO
/// week number; `DayOfWeek` counts from Monday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexAttribute {
    Hour,
    Minute,
    Week,
    Month,
    DayOfWeek,
    DaysInMonth,
}

impl IndexAttribute {
    /// Attribute name used when deriving column labels
    pub fn name(&self) -> &'static str {
        match self {
            IndexAttribute::Hour => "hour",
            IndexAttribute::Minute => "minute",
            IndexAttribute::Week => "week",
            IndexAttribute::Month => "month",
            IndexAttribute::DayOfWeek => "dayofweek",
            IndexAttribute::DaysInMonth => "daysinmonth",
        }
    }

    /// Read the attribute off a single timestamp
    pub fn extract(&self, ts: &DateTime<Utc>) -> f64 {
        match self {
            IndexAttribute::Hour => ts.hour() as f64,
            IndexAttribute::Minute => ts.minute() as f64,
            IndexAttribute::Week => ts.iso_week().week() as f64,
            IndexAttribute::Month => ts.month() as f64,
            IndexAttribute::DayOfWeek => ts.weekday().num_days_from_monday() as f64,
            IndexAttribute::DaysInMonth => days_in_month(ts.year(), ts.month()) as f64,
        }
    }

    /// Read the attribute off every timestamp of an index
    pub fn extract_all(&self, index: &[DateTime<Utc>]) -> Vec<f64> {
        index.iter().map(|ts| self.extract(ts)).collect()
    }
}

/// Number of calendar days in a month, leap-year aware
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    // First day of the following month, stepped back one day.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// Minute within the day for every timestamp (0..=1439)
pub fn compute_minute_of_day(index: &[DateTime<Utc>]) -> Vec<u32> {
    index.iter().map(|ts| ts.hour() * 60 + ts.minute()).collect()
}

/// Second within the minute for every timestamp (0..=59)
pub fn compute_second_of_minute(index: &[DateTime<Utc>]) -> Vec<u32> {
    index.iter().map(|ts| ts.second()).collect()
}
