//! Calendar month used for summaries and budget refreshes

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use std::fmt;

/// A calendar month (e.g., "2025-01")
///
/// Stored as its first day, so every `Month` is a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    /// Create a month, rejecting month numbers outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PeriodParseError::InvalidFormat(format!("{}-{:02}", year, month)))?;
        Ok(Self { first })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    pub fn previous(&self) -> Self {
        self.first
            .pred_opt()
            .map(Self::from_date)
            .unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(Self::from_date)
            .unwrap_or(*self)
    }

    /// Human-readable form, e.g. "January 2025"
    pub fn friendly(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Parse a month string
    ///
    /// Formats:
    /// - "2025-01"
    /// - "current" / "this"
    /// - "last" / "previous"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        match s.to_lowercase().as_str() {
            "current" | "this" => return Ok(Self::current()),
            "last" | "previous" => return Ok(Self::current().previous()),
            _ => {}
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
