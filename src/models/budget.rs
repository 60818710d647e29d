//! Budget category model
//!
//! A budget category pairs a configured monthly limit with the amount spent in
//! the most recently refreshed month, and knows how to classify itself.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Percentage-used ceiling for the green tier (inclusive)
pub const GREEN_THRESHOLD: f64 = 75.0;

/// Percentage-used ceiling for the yellow tier (inclusive)
pub const YELLOW_THRESHOLD: f64 = 90.0;

/// A configured spending limit for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category name, unique within the ledger
    pub name: String,

    /// Configured monthly limit (not validated; may be zero or negative)
    pub monthly_limit: Money,

    /// Expense total for the most recently refreshed month
    #[serde(default)]
    pub current_spent: Money,
}

impl BudgetCategory {
    /// Create a new category with nothing spent
    pub fn new(name: impl Into<String>, monthly_limit: Money) -> Self {
        Self {
            name: name.into(),
            monthly_limit,
            current_spent: Money::zero(),
        }
    }

    /// Limit minus spent; negative when overspent
    pub fn remaining(&self) -> Money {
        self.monthly_limit - self.current_spent
    }

    /// Spent as a percentage of the limit
    ///
    /// A zero limit is reported as 0% rather than dividing by zero.
    pub fn percentage_used(&self) -> f64 {
        self.current_spent
            .percent_of(self.monthly_limit)
            .unwrap_or(0.0)
    }

    pub fn alert_level(&self) -> AlertLevel {
        AlertLevel::from_percentage(self.percentage_used())
    }

    pub fn is_overspent(&self) -> bool {
        self.current_spent > self.monthly_limit
    }

    /// Spent less than 70% of the limit
    pub fn is_underspent(&self) -> bool {
        // spent < 0.7 * limit, in integer cents widened so the products cannot overflow
        i128::from(self.current_spent.cents()) * 10 < i128::from(self.monthly_limit.cents()) * 7
    }

    /// Snapshot of this category's status
    pub fn status(&self) -> CategoryStatus {
        CategoryStatus {
            name: self.name.clone(),
            limit: self.monthly_limit,
            spent: self.current_spent,
            remaining: self.remaining(),
            percentage_used: self.percentage_used(),
            alert_level: self.alert_level(),
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {}",
            self.name, self.current_spent, self.monthly_limit
        )
    }
}

/// Green/yellow/red classification of budget percentage-used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Green,
    Yellow,
    Red,
}

impl AlertLevel {
    /// Classify a percentage-used figure
    ///
    /// Both thresholds are inclusive: exactly 75% is green and exactly 90% is
    /// yellow.
    pub fn from_percentage(percentage_used: f64) -> Self {
        if percentage_used <= GREEN_THRESHOLD {
            Self::Green
        } else if percentage_used <= YELLOW_THRESHOLD {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    /// Marker used in the text report
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Green => "🟢",
            Self::Yellow => "🟡",
            Self::Red => "🔴",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// Derived status of one budget category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatus {
    pub name: String,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    pub percentage_used: f64,
    pub alert_level: AlertLevel,
}

/// Suggestion to cover an overspent category from an underspent one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReallocationSuggestion {
    /// The overspent category
    pub category: String,
    /// The underspent category with enough surplus
    pub donor: String,
    /// How far `category` is over its limit
    pub amount: Money,
}

impl fmt::Display for ReallocationSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Consider reallocating {} from {}",
            self.amount, self.donor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(limit_cents: i64, spent_cents: i64) -> BudgetCategory {
        let mut cat = BudgetCategory::new("Test", Money::from_cents(limit_cents));
        cat.current_spent = Money::from_cents(spent_cents);
        cat
    }

    #[test]
    fn test_new_category_has_no_spending() {
        let cat = BudgetCategory::new("Food", Money::from_units(600));
        assert!(cat.current_spent.is_zero());
        assert_eq!(cat.remaining(), Money::from_units(600));
    }

    #[test]
    fn test_green_at_exactly_75_percent() {
        let cat = category(60000, 45000);
        let status = cat.status();
        assert_eq!(status.percentage_used, 75.0);
        assert_eq!(status.alert_level, AlertLevel::Green);
        assert_eq!(status.remaining, Money::from_units(150));
    }

    #[test]
    fn test_red_at_95_percent() {
        let cat = category(20000, 19000);
        assert!((cat.percentage_used() - 95.0).abs() < 1e-9);
        assert_eq!(cat.alert_level(), AlertLevel::Red);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(category(10000, 7500).alert_level(), AlertLevel::Green);
        assert_eq!(category(10000, 7501).alert_level(), AlertLevel::Yellow);
        assert_eq!(category(10000, 9000).alert_level(), AlertLevel::Yellow);
        assert_eq!(category(10000, 9001).alert_level(), AlertLevel::Red);
    }

    #[test]
    fn test_zero_limit_is_green() {
        let cat = category(0, 5000);
        assert_eq!(cat.percentage_used(), 0.0);
        assert_eq!(cat.alert_level(), AlertLevel::Green);
        assert!(cat.is_overspent());
    }

    #[test]
    fn test_percentage_monotonic_in_spent() {
        let mut last = f64::MIN;
        for spent in (0..=30000).step_by(250) {
            let pct = category(20000, spent).percentage_used();
            assert!(pct >= last);
            last = pct;
        }
    }

    #[test]
    fn test_overspent_and_underspent() {
        assert!(category(60000, 70000).is_overspent());
        assert!(!category(60000, 60000).is_overspent());

        // 0.7 * 150 = 105
        assert!(category(15000, 5000).is_underspent());
        assert!(category(15000, 10499).is_underspent());
        assert!(!category(15000, 10500).is_underspent());
    }

    #[test]
    fn test_extreme_amounts_do_not_overflow() {
        assert!(category(i64::MAX, 0).is_underspent());
        assert!(!category(i64::MAX, i64::MAX).is_underspent());

        let huge = category(i64::MIN, i64::MAX);
        assert!(huge.is_overspent());
        assert_eq!(huge.remaining().cents(), i64::MIN);
    }

    #[test]
    fn test_suggestion_display() {
        let suggestion = ReallocationSuggestion {
            category: "Food".into(),
            donor: "Entertainment".into(),
            amount: Money::from_units(100),
        };
        assert_eq!(
            suggestion.to_string(),
            "Consider reallocating $100.00 from Entertainment"
        );
    }

    #[test]
    fn test_document_shape() {
        let mut cat = BudgetCategory::new("Food", Money::from_units(600));
        cat.current_spent = Money::from_cents(4550);
        let value = serde_json::to_value(&cat).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Food", "monthly_limit": 600.0, "current_spent": 45.5})
        );

        let missing_spent: BudgetCategory =
            serde_json::from_str(r#"{"name": "Gas", "monthly_limit": 80}"#).unwrap();
        assert!(missing_spent.current_spent.is_zero());
    }
}
