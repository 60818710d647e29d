//! Financial health score
//!
//! Combines income, expenses and savings into a 0-100 score, a letter grade
//! and a list of recommendations.

use serde::Serialize;
use std::fmt;

use crate::models::Money;

/// Letter grade derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Bands are checked from the top down, so each score lands in exactly one
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::APlus,
            80..=89 => Self::A,
            70..=79 => Self::B,
            60..=69 => Self::C,
            50..=59 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.pad(label)
    }
}

/// Financial health assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthScore {
    /// 0-100
    pub score: u32,
    pub grade: Grade,
    /// Savings as a percentage of income
    pub savings_rate: f64,
    /// Expenses as a percentage of income
    pub expense_ratio: f64,
    /// Months of expenses covered by savings
    pub emergency_fund_months: f64,
    pub recommendations: Vec<String>,
}

impl HealthScore {
    /// Score the given figures
    ///
    /// Zero income scores 0 (F) with every ratio reported as 0.
    pub fn calculate(income: Money, expenses: Money, savings: Money) -> Self {
        let (Some(savings_rate), Some(expense_ratio)) =
            (savings.percent_of(income), expenses.percent_of(income))
        else {
            return Self {
                score: 0,
                grade: Grade::F,
                savings_rate: 0.0,
                expense_ratio: 0.0,
                emergency_fund_months: 0.0,
                recommendations: vec!["Increase income sources".to_string()],
            };
        };

        // savings / (expenses / 12), kept in whole cents until the last step
        let emergency_fund_months = if expenses.is_positive() {
            (savings.cents() as f64 * 12.0) / expenses.cents() as f64
        } else {
            0.0
        };

        let score = savings_points(savings_rate)
            + expense_points(expense_ratio)
            + emergency_fund_points(emergency_fund_months);

        let mut recommendations = Vec::new();
        if savings_rate < 10.0 {
            recommendations.push("Increase savings rate to at least 10%".to_string());
        }
        if expense_ratio > 70.0 {
            recommendations.push("Reduce monthly expenses".to_string());
        }
        if emergency_fund_months < 3.0 {
            recommendations.push("Build emergency fund (3-6 months expenses)".to_string());
        }

        Self {
            score,
            grade: Grade::from_score(score),
            savings_rate,
            expense_ratio,
            emergency_fund_months,
            recommendations,
        }
    }

    /// Format the assessment for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Financial Health Score\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("Score: {}/100 (Grade: {})\n\n", self.score, self.grade));
        output.push_str(&format!("{:<24} {:>10.1}%\n", "Savings rate:", self.savings_rate));
        output.push_str(&format!("{:<24} {:>10.1}%\n", "Expense ratio:", self.expense_ratio));
        output.push_str(&format!(
            "{:<24} {:>11.1}\n",
            "Emergency fund (months):", self.emergency_fund_months
        ));

        if self.recommendations.is_empty() {
            output.push_str("\nNo recommendations. Keep it up!\n");
        } else {
            output.push_str("\nRecommendations:\n");
            for rec in &self.recommendations {
                output.push_str(&format!("  • {}\n", rec));
            }
        }

        output
    }
}

fn savings_points(savings_rate: f64) -> u32 {
    if savings_rate >= 20.0 {
        40
    } else if savings_rate >= 10.0 {
        25
    } else if savings_rate >= 5.0 {
        15
    } else {
        0
    }
}

fn expense_points(expense_ratio: f64) -> u32 {
    if expense_ratio <= 50.0 {
        30
    } else if expense_ratio <= 70.0 {
        20
    } else if expense_ratio <= 90.0 {
        10
    } else {
        0
    }
}

fn emergency_fund_points(months: f64) -> u32 {
    if months >= 6.0 {
        30
    } else if months >= 3.0 {
        20
    } else if months >= 1.0 {
        10
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_strong_finances_score_a_plus() {
        let health = HealthScore::calculate(units(5000), units(3000), units(2000));

        assert_eq!(health.savings_rate, 40.0);
        assert_eq!(health.expense_ratio, 60.0);
        assert_eq!(health.emergency_fund_months, 8.0);
        assert_eq!(health.score, 90);
        assert_eq!(health.grade, Grade::APlus);
        assert!(health.recommendations.is_empty());
    }

    #[test]
    fn test_zero_income() {
        let health = HealthScore::calculate(Money::zero(), units(3000), units(2000));

        assert_eq!(health.score, 0);
        assert_eq!(health.grade, Grade::F);
        assert_eq!(health.savings_rate, 0.0);
        assert_eq!(health.expense_ratio, 0.0);
        assert_eq!(health.emergency_fund_months, 0.0);
        assert_eq!(health.recommendations, vec!["Increase income sources"]);
    }

    #[test]
    fn test_zero_expenses_means_no_emergency_months() {
        let health = HealthScore::calculate(units(1000), Money::zero(), units(500));
        assert_eq!(health.emergency_fund_months, 0.0);
        // 40 for savings, 30 for expenses, nothing for the fund
        assert_eq!(health.score, 70);
        assert_eq!(health.grade, Grade::B);
        assert_eq!(
            health.recommendations,
            vec!["Build emergency fund (3-6 months expenses)"]
        );
    }

    #[test]
    fn test_poor_finances_get_all_recommendations() {
        let health = HealthScore::calculate(units(1000), units(950), units(20));

        assert_eq!(health.score, 0);
        assert_eq!(health.grade, Grade::F);
        assert_eq!(
            health.recommendations,
            vec![
                "Increase savings rate to at least 10%",
                "Reduce monthly expenses",
                "Build emergency fund (3-6 months expenses)",
            ]
        );
    }

    #[test]
    fn test_score_is_bounded() {
        for income in [0, 1, 100, 5000, 100000] {
            for expenses in [0, 1, 500, 5000, 200000] {
                for savings in [0, 10, 1000, 50000, 1000000] {
                    let health = HealthScore::calculate(units(income), units(expenses), units(savings));
                    assert!(health.score <= 100);
                }
            }
        }
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(100), Grade::APlus);
        assert_eq!(Grade::from_score(90), Grade::APlus);
        assert_eq!(Grade::from_score(89), Grade::A);
        assert_eq!(Grade::from_score(80), Grade::A);
        assert_eq!(Grade::from_score(75), Grade::B);
        assert_eq!(Grade::from_score(65), Grade::C);
        assert_eq!(Grade::from_score(55), Grade::D);
        assert_eq!(Grade::from_score(49), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
        assert_eq!(Grade::APlus.to_string(), "A+");
    }

    #[test]
    fn test_point_thresholds_are_inclusive() {
        assert_eq!(savings_points(20.0), 40);
        assert_eq!(savings_points(10.0), 25);
        assert_eq!(savings_points(5.0), 15);
        assert_eq!(savings_points(4.99), 0);
        assert_eq!(expense_points(50.0), 30);
        assert_eq!(expense_points(70.0), 20);
        assert_eq!(expense_points(90.0), 10);
        assert_eq!(expense_points(90.01), 0);
        assert_eq!(emergency_fund_points(6.0), 30);
        assert_eq!(emergency_fund_points(3.0), 20);
        assert_eq!(emergency_fund_points(1.0), 10);
        assert_eq!(emergency_fund_points(0.5), 0);
    }

    #[test]
    fn test_format_terminal() {
        let output = HealthScore::calculate(units(5000), units(3000), units(2000)).format_terminal();
        assert!(output.contains("Score: 90/100 (Grade: A+)"));
        assert!(output.contains("Savings rate:"));
    }
}
