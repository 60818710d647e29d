//! Spending trend detection
//!
//! Compares the average of the most recent window of a daily series against
//! the window before it.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Transaction};

/// Default window size in days
pub const DEFAULT_PERIOD_DAYS: usize = 30;

/// Largest accepted window, ten years of days
pub const MAX_PERIOD_DAYS: usize = 3650;

/// Direction of a series over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient data",
        };
        f.pad(label)
    }
}

/// Split a series into (recent, older) windows
///
/// The recent window is the last `period` points. The older window is the
/// `period` points before it when the series holds at least two full windows,
/// otherwise everything before the recent window.
fn windows<T>(data: &[T], period: usize) -> Option<(&[T], &[T])> {
    if data.len() < 2 || period == 0 {
        return None;
    }

    let split = data.len().saturating_sub(period);
    let recent = &data[split..];
    let older = if period.checked_mul(2).is_some_and(|both| data.len() >= both) {
        &data[split - period..split]
    } else {
        &data[..split]
    };

    if older.is_empty() {
        None
    } else {
        Some((recent, older))
    }
}

/// Classify a dated series
///
/// Increasing when the recent average exceeds the older one by more than 10%,
/// decreasing when it falls more than 10% below it.
pub fn calculate_trend(data: &[(NaiveDate, Money)], period_days: usize) -> TrendDirection {
    let Some((recent, older)) = windows(data, period_days) else {
        return TrendDirection::InsufficientData;
    };

    let recent_sum: i128 = recent.iter().map(|(_, m)| i128::from(m.cents())).sum();
    let older_sum: i128 = older.iter().map(|(_, m)| i128::from(m.cents())).sum();
    let recent_len = recent.len() as i128;
    let older_len = older.len() as i128;

    // recent_avg vs older_avg * 1.1 and * 0.9, cross-multiplied
    let recent_scaled = recent_sum * older_len * 10;
    if recent_scaled > older_sum * recent_len * 11 {
        TrendDirection::Increasing
    } else if recent_scaled < older_sum * recent_len * 9 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Every date from `start` to `end`, inclusive
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Expense total for each day in `start..=end`, including days with none
pub fn daily_expenses(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<(NaiveDate, Money)> {
    date_range(start, end)
        .into_iter()
        .map(|day| {
            let total = transactions
                .iter()
                .filter(|t| t.is_expense() && t.date == day)
                .map(|t| t.amount)
                .sum();
            (day, total)
        })
        .collect()
}

/// `(income - expenses) / income * 100`, or 0 when there is no income
pub fn savings_rate(income: Money, expenses: Money) -> f64 {
    (income - expenses).percent_of(income).unwrap_or(0.0)
}

fn average(series: &[(NaiveDate, Money)]) -> Money {
    if series.is_empty() {
        return Money::zero();
    }
    let total: Money = series.iter().map(|(_, m)| *m).sum();
    Money::from_cents(total.cents() / series.len() as i64)
}

/// Daily spending trend over the two windows ending on a given day
#[derive(Debug, Clone, Serialize)]
pub struct SpendingTrend {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub period_days: usize,
    pub direction: TrendDirection,
    pub recent_average: Money,
    pub older_average: Money,
}

impl SpendingTrend {
    /// Analyze the `2 * period_days` days ending on `end_date`
    ///
    /// `period_days` must be between 1 and [`MAX_PERIOD_DAYS`].
    pub fn generate(
        transactions: &[Transaction],
        end_date: NaiveDate,
        period_days: usize,
    ) -> TrackerResult<Self> {
        if !(1..=MAX_PERIOD_DAYS).contains(&period_days) {
            return Err(TrackerError::Validation(format!(
                "Trend period must be between 1 and {} days (got {})",
                MAX_PERIOD_DAYS, period_days
            )));
        }

        let span = (period_days * 2) as u64;
        let start_date = end_date
            .checked_sub_days(Days::new(span - 1))
            .ok_or_else(|| {
                TrackerError::Validation(format!("Trend window ending {} is out of range", end_date))
            })?;
        let series = daily_expenses(transactions, start_date, end_date);

        let (recent_average, older_average) = match windows(&series, period_days) {
            Some((recent, older)) => (average(recent), average(older)),
            None => (Money::zero(), Money::zero()),
        };

        Ok(Self {
            start_date,
            end_date,
            period_days,
            direction: calculate_trend(&series, period_days),
            recent_average,
            older_average,
        })
    }

    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Trend: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "Recent {} days average:  {}/day\n",
            self.period_days,
            self.recent_average.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Previous {} days average: {}/day\n",
            self.period_days,
            self.older_average.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Trend: {}\n", self.direction));

        output
    }
}
