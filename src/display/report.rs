//! Report formatting utilities for terminal output

use crate::reports::MonthlySummary;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Horizontal bar chart of a month's spending by category
///
/// Bars are scaled against the largest category; each row ends with the
/// category's share of the month's expenses.
pub fn format_spending_chart(summary: &MonthlySummary, width: usize, currency_symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Monthly Spending by Category\n");
    output.push_str(&separator(width + 40));
    output.push('\n');

    let rows: Vec<_> = summary
        .category_breakdown
        .iter()
        .filter(|c| c.amount.is_positive())
        .collect();

    if rows.is_empty() {
        output.push_str("No expenses to chart.\n");
        return output;
    }

    let max = rows
        .iter()
        .map(|c| c.amount.as_f64())
        .fold(0.0_f64, f64::max);

    for row in rows {
        let share = row.amount.percent_of(summary.expenses).unwrap_or(0.0);
        output.push_str(&format!(
            "{:<16} {} {:>12} {:>6}\n",
            truncate(&row.category, 16),
            format_bar(row.amount.as_f64(), max, width),
            row.amount.format_with_symbol(currency_symbol),
            format_percentage(share)
        ));
    }

    output
}
