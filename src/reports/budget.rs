//! Monthly budget report
//!
//! Totals, overspent categories, a per-category breakdown with alert markers
//! and reallocation suggestions.

use crate::models::{BudgetCategory, CategoryStatus, Money, ReallocationSuggestion};
use crate::services::budget::suggest_reallocation;

#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub total_budget: Money,
    pub total_spent: Money,
    pub categories: Vec<CategoryStatus>,
    pub suggestions: Vec<ReallocationSuggestion>,
}

impl BudgetReport {
    /// Build the report from the ledger's categories
    pub fn generate(categories: &[BudgetCategory]) -> Self {
        Self {
            total_budget: categories.iter().map(|c| c.monthly_limit).sum(),
            total_spent: categories.iter().map(|c| c.current_spent).sum(),
            categories: categories.iter().map(BudgetCategory::status).collect(),
            suggestions: suggest_reallocation(categories),
        }
    }

    /// Budget minus spending across all categories
    pub fn overall_remaining(&self) -> Money {
        self.total_budget - self.total_spent
    }

    /// Categories spending more than their limit, in ledger order
    pub fn overspent(&self) -> impl Iterator<Item = &CategoryStatus> {
        self.categories.iter().filter(|s| s.spent > s.limit)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::from("=== MONTHLY BUDGET REPORT ===\n\n");

        output.push_str(&format!("Total Budget: {}\n", self.total_budget));
        output.push_str(&format!("Total Spent: {}\n", self.total_spent));
        output.push_str(&format!("Overall Remaining: {}\n\n", self.overall_remaining()));

        let overspent: Vec<_> = self.overspent().collect();
        if !overspent.is_empty() {
            output.push_str("🚨 OVERSPENT CATEGORIES:\n");
            for status in overspent {
                output.push_str(&format!(
                    "  • {}: {} / {} ({:.1}%)\n",
                    status.name, status.spent, status.limit, status.percentage_used
                ));
            }
            output.push('\n');
        }

        output.push_str("CATEGORY BREAKDOWN:\n");
        for status in &self.categories {
            output.push_str(&format!(
                "{} {}: {} / {} ({:.1}%)\n",
                status.alert_level.marker(),
                status.name,
                status.spent,
                status.limit,
                status.percentage_used
            ));
        }

        if !self.suggestions.is_empty() {
            output.push_str("\n💡 REALLOCATION SUGGESTIONS:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {}: {}\n", suggestion.category, suggestion));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, limit: i64, spent: i64) -> BudgetCategory {
        let mut cat = BudgetCategory::new(name, Money::from_units(limit));
        cat.current_spent = Money::from_units(spent);
        cat
    }

    #[test]
    fn test_full_report_text() {
        let categories = vec![
            category("Food", 600, 700),
            category("Entertainment", 150, 50),
            category("Utilities", 300, 255),
        ];

        let report = BudgetReport::generate(&categories).format_terminal();
        let expected = "=== MONTHLY BUDGET REPORT ===\n\
\n\
Total Budget: $1050.00\n\
Total Spent: $1005.00\n\
Overall Remaining: $45.00\n\
\n\
🚨 OVERSPENT CATEGORIES:\n  \
• Food: $700.00 / $600.00 (116.7%)\n\
\n\
CATEGORY BREAKDOWN:\n\
🔴 Food: $700.00 / $600.00 (116.7%)\n\
🟢 Entertainment: $50.00 / $150.00 (33.3%)\n\
🟡 Utilities: $255.00 / $300.00 (85.0%)\n\
\n\
💡 REALLOCATION SUGGESTIONS:\n  \
• Food: Consider reallocating $100.00 from Entertainment\n";

        assert_eq!(report, expected);
    }

    #[test]
    fn test_sections_omitted_when_empty() {
        let report = BudgetReport::generate(&[category("Food", 600, 100)]).format_terminal();
        assert!(!report.contains("OVERSPENT"));
        assert!(!report.contains("REALLOCATION"));
        assert!(report.contains("🟢 Food: $100.00 / $600.00 (16.7%)"));
    }

    #[test]
    fn test_empty_ledger() {
        let report = BudgetReport::generate(&[]);
        assert!(report.total_budget.is_zero());
        assert!(report.format_terminal().contains("Overall Remaining: $0.00"));
    }

    #[test]
    fn test_zero_limit_category_reports_zero_percent() {
        let report = BudgetReport::generate(&[category("Gifts", 0, 25)]).format_terminal();
        assert!(report.contains("🟢 Gifts: $25.00 / $0.00 (0.0%)"));
        assert!(report.contains("• Gifts: $25.00 / $0.00 (0.0%)"));
    }

    #[test]
    fn test_negative_remaining_puts_sign_before_symbol() {
        let report = BudgetReport::generate(&[category("Food", 500, 600)]).format_terminal();
        assert!(report.contains("Overall Remaining: -$100.00\n"));
    }
}
