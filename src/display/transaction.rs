//! Transaction display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Transaction, TransactionKind};

use super::report::truncate;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a table
///
/// Expenses are shown with a leading minus so the column reads as signed.
pub fn format_transaction_table(
    transactions: &[Transaction],
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        date: txn.date.format(date_format).to_string(),
        kind: txn.kind.to_string(),
        category: truncate(&txn.category, 20),
        description: truncate(&txn.description, 30),
        amount: txn.signed_amount().format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// One-line confirmation after recording a transaction
pub fn format_transaction_added(txn: &Transaction, currency_symbol: &str) -> String {
    let noun = match txn.kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    };
    format!(
        "{} added successfully! {} {} on {}",
        noun,
        txn.amount.format_with_symbol(currency_symbol),
        txn.category,
        txn.date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn sample() -> Vec<Transaction> {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        vec![
            Transaction::income(Money::from_units(2500), "Salary", "January pay", day),
            Transaction::expense(Money::from_cents(4599), "Food", "Groceries", day),
        ]
    }

    #[test]
    fn test_table_contents() {
        let table = format_transaction_table(&sample(), "$", "%Y-%m-%d");
        assert!(table.contains("Category"));
        assert!(table.contains("2025-01-15"));
        assert!(table.contains("$2,500.00"));
        assert!(table.contains("-$45.99"));
        assert!(table.contains("Groceries"));
    }

    #[test]
    fn test_custom_date_format() {
        let table = format_transaction_table(&sample(), "€", "%d/%m/%Y");
        assert!(table.contains("15/01/2025"));
        assert!(table.contains("€2,500.00"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_transaction_table(&[], "$", "%Y-%m-%d"), "No transactions found.\n");
    }

    #[test]
    fn test_added_message() {
        let message = format_transaction_added(&sample()[1], "$");
        assert_eq!(message, "Expense added successfully! $45.99 Food on 2025-01-15");
    }
}
