//! Monthly summary
//!
//! Income, expense and net totals for one calendar month, with a per-category
//! expense breakdown.

use std::io::Write;

use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::{Money, Month, Transaction, TransactionKind};

use super::trend::savings_rate;

/// Expense total for one category within the month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: Money,
}

/// Summary of one month of transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    /// Income minus expenses
    pub net: Money,
    /// Categories in first-seen order; amounts count expenses only
    pub category_breakdown: Vec<CategoryExpense>,
    pub transaction_count: usize,
}

impl MonthlySummary {
    /// Summarize the transactions dated in (year, month)
    ///
    /// Any transaction in the month introduces its category into the
    /// breakdown, so an income-only category shows up with a zero amount.
    pub fn generate(transactions: &[Transaction], year: i32, month: u32) -> Self {
        let mut income = Money::zero();
        let mut expenses = Money::zero();
        let mut breakdown: Vec<CategoryExpense> = Vec::new();
        let mut transaction_count = 0;

        for txn in transactions.iter().filter(|t| t.is_in_month(year, month)) {
            transaction_count += 1;

            let position = match breakdown.iter().position(|c| c.category == txn.category) {
                Some(pos) => pos,
                None => {
                    breakdown.push(CategoryExpense {
                        category: txn.category.clone(),
                        amount: Money::zero(),
                    });
                    breakdown.len() - 1
                }
            };

            match txn.kind {
                TransactionKind::Income => income += txn.amount,
                TransactionKind::Expense => {
                    expenses += txn.amount;
                    breakdown[position].amount += txn.amount;
                }
            }
        }

        Self {
            year,
            month,
            income,
            expenses,
            net: income - expenses,
            category_breakdown: breakdown,
            transaction_count,
        }
    }

    /// Summarize a [`Month`]
    pub fn for_month(transactions: &[Transaction], month: Month) -> Self {
        Self::generate(transactions, month.year(), month.month())
    }

    /// Expense total for a category, if it appears in the month
    pub fn category_amount(&self, category: &str) -> Option<Money> {
        self.category_breakdown
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
    }

    /// The `limit` categories with the most spending
    pub fn top_categories(&self, limit: usize) -> Vec<&CategoryExpense> {
        let mut sorted: Vec<_> = self.category_breakdown.iter().collect();
        sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
        sorted.into_iter().take(limit).collect()
    }

    fn label(&self) -> String {
        Month::new(self.year, self.month)
            .map(|m| m.friendly())
            .unwrap_or_else(|_| format!("{:04}-{:02}", self.year, self.month))
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary: {}\n", self.label()));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>15}\n",
            "Income:",
            self.income.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>15}\n",
            "Expenses:",
            self.expenses.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>15}\n",
            "Net:",
            self.net.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>14.1}%\n",
            "Savings rate:",
            savings_rate(self.income, self.expenses)
        ));
        output.push_str(&format!("{:<20} {:>15}\n", "Transactions:", self.transaction_count));

        if self.category_breakdown.is_empty() {
            output.push_str("\nNo transactions this month.\n");
            return output;
        }

        output.push_str("\nExpenses by Category:\n");
        output.push_str(&"-".repeat(50));
        output.push('\n');
        for entry in &self.category_breakdown {
            let share = entry
                .amount
                .percent_of(self.expenses)
                .unwrap_or(0.0);
            output.push_str(&format!(
                "  {:<25} {:>12} {:>7.1}%\n",
                entry.category,
                entry.amount.format_with_symbol(currency_symbol),
                share
            ));
        }

        output
    }

    /// Export the category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let period = format!("{:04}-{:02}", self.year, self.month);

        csv_writer.write_record(["Month", "Category", "Expenses"])?;
        for entry in &self.category_breakdown {
            let amount = format!("{:.2}", entry.amount.as_f64());
            csv_writer.write_record([period.as_str(), entry.category.as_str(), amount.as_str()])?;
        }
        let total = format!("{:.2}", self.expenses.as_f64());
        csv_writer.write_record([period.as_str(), "TOTAL", total.as_str()])?;

        csv_writer.flush()?;
        Ok(())
    }
}
