//! Interactive text menu
//!
//! The default mode when `fintrack` runs without a subcommand. Reads one
//! answer per line from `input` and writes prompts and results to `output`,
//! so tests can drive it with in-memory buffers. End of input exits the menu.

use std::io::{BufRead, Write};

use chrono::Local;

use crate::config::settings::Settings;
use crate::display::{format_status_table, format_transaction_added};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Month, TransactionKind};
use crate::reports::MonthlySummary;
use crate::services::transaction::parse_amount;
use crate::services::{BudgetService, CreateTransactionInput, TransactionService};
use crate::storage::Storage;

use super::parse_month_arg;
use super::report::HealthInputs;

/// Whether the loop should keep going after a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu session state
pub struct Menu<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    input: R,
    output: W,
}

/// Run the interactive menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    storage: &Storage,
    settings: &Settings,
    input: R,
    output: W,
) -> TrackerResult<()> {
    Menu::new(storage, settings, input, output).run()
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            storage,
            settings,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> TrackerResult<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Personal Finance Tracker ---")?;
            writeln!(self.output, "1. Add Income")?;
            writeln!(self.output, "2. Add Expense")?;
            writeln!(self.output, "3. View Balance")?;
            writeln!(self.output, "4. Monthly Summary")?;
            writeln!(self.output, "5. Budget Management")?;
            writeln!(self.output, "6. Health Score")?;
            writeln!(self.output, "7. Exit")?;

            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.add_transaction(TransactionKind::Income)?,
                "2" => self.add_transaction(TransactionKind::Expense)?,
                "3" => self.view_balance()?,
                "4" => self.monthly_summary()?,
                "5" => self.budget_menu()?,
                "6" => self.health_score()?,
                "7" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid option!")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn add_transaction(&mut self, kind: TransactionKind) -> TrackerResult<Flow> {
        let label = match kind {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };

        let Some(amount) = self.prompt(&format!("Enter {} amount: ", label))? else {
            return Ok(Flow::Exit);
        };
        let amount = parse_amount(&amount)?;
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(Flow::Exit);
        };

        let txn = TransactionService::new(self.storage).add(CreateTransactionInput {
            amount,
            category,
            description,
            date: Local::now().date_naive(),
            kind,
        })?;
        BudgetService::new(self.storage).refresh_month(Month::current())?;

        writeln!(
            self.output,
            "{}",
            format_transaction_added(&txn, &self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn view_balance(&mut self) -> TrackerResult<Flow> {
        let balance = TransactionService::new(self.storage).balance()?;
        writeln!(
            self.output,
            "Current balance: {}",
            balance.format_with_symbol(&self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn monthly_summary(&mut self) -> TrackerResult<Flow> {
        let Some(month) = self.prompt("Enter month (YYYY-MM) [current]: ")? else {
            return Ok(Flow::Exit);
        };
        let month = parse_month_arg(Some(month.as_str()).filter(|m| !m.is_empty()))?;

        let transactions = self.storage.transactions.get_all()?;
        let summary = MonthlySummary::for_month(&transactions, month);
        write!(
            self.output,
            "{}",
            summary.format_terminal(&self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn budget_menu(&mut self) -> TrackerResult<Flow> {
        let service = BudgetService::new(self.storage);
        let settings = self.settings;
        let symbol = settings.currency_symbol.as_str();

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Budget Management ---")?;
            writeln!(self.output, "1. Set Category Limit")?;
            writeln!(self.output, "2. View Budget Status")?;
            writeln!(self.output, "3. View Budget Report")?;
            writeln!(self.output, "4. Back")?;

            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(Flow::Exit);
            };

            match choice.as_str() {
                "1" => {
                    let Some(category) = self.prompt("Enter category: ")? else {
                        return Ok(Flow::Exit);
                    };
                    let Some(limit) = self.prompt("Enter monthly limit: ")? else {
                        return Ok(Flow::Exit);
                    };
                    let limit = Money::parse(&limit)
                        .map_err(|e| TrackerError::Validation(e.to_string()))?;

                    let updated = service.set_limit(&category, limit)?;
                    writeln!(
                        self.output,
                        "Budget set for {}: {}",
                        updated.name,
                        updated.monthly_limit.format_with_symbol(symbol)
                    )?;
                }
                "2" => {
                    write!(self.output, "{}", format_status_table(&service.status()?, symbol))?;
                }
                "3" => {
                    write!(self.output, "{}", service.report()?)?;
                }
                "4" => return Ok(Flow::Continue),
                _ => writeln!(self.output, "Invalid option!")?,
            }
        }
    }

    fn health_score(&mut self) -> TrackerResult<Flow> {
        let score = HealthInputs::for_month(self.storage, Month::current())?.score();
        write!(self.output, "{}", score.format_terminal())?;
        Ok(Flow::Continue)
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> TrackerResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn run(storage: &Storage, script: &str) -> (TrackerResult<()>, String) {
        let settings = Settings::default();
        let mut output = Vec::new();
        let result = run_menu(storage, &settings, Cursor::new(script.to_string()), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_add_income_and_expense_then_balance() {
        let (_temp_dir, storage) = create_test_storage();

        let (result, output) = run(
            &storage,
            "1\n3000\nSalary\nJanuary pay\n2\n45.99\nFood\nGroceries\n3\n7\n",
        );

        assert!(result.is_ok());
        assert!(output.contains("Income added successfully!"));
        assert!(output.contains("Expense added successfully!"));
        assert!(output.contains("Current balance: $2,954.01"));
        assert_eq!(storage.transactions.count().unwrap(), 2);
    }

    #[test]
    fn test_expense_updates_budget_spending() {
        let (_temp_dir, storage) = create_test_storage();

        let (result, output) = run(&storage, "5\n1\nFood\n600\n4\n2\n450\nFood\n\n5\n2\n4\n7\n");

        assert!(result.is_ok());
        assert!(output.contains("Budget set for Food: $600.00"));
        assert!(output.contains("75.0%"));
        let food = storage.budget.get("Food").unwrap().unwrap();
        assert_eq!(food.current_spent, Money::from_units(450));
    }

    #[test]
    fn test_malformed_amount_aborts() {
        let (_temp_dir, storage) = create_test_storage();

        let (result, _) = run(&storage, "1\nlots\n");

        assert!(result.unwrap_err().is_validation());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_invalid_option_and_eof() {
        let (_temp_dir, storage) = create_test_storage();

        let (result, output) = run(&storage, "9\n");

        assert!(result.is_ok());
        assert!(output.contains("Invalid option!"));
    }

    #[test]
    fn test_health_score_with_no_income() {
        let (_temp_dir, storage) = create_test_storage();

        let (result, output) = run(&storage, "6\n7\n");

        assert!(result.is_ok());
        assert!(output.contains("Score: 0/100 (Grade: F)"));
        assert!(output.contains("Increase income sources"));
    }
}
