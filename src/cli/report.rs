//! CLI commands for reports
//!
//! Monthly summary, financial health score, spending trend and the category
//! spending chart.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_spending_chart;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Month};
use crate::reports::{HealthScore, MonthlySummary, SpendingTrend};
use crate::services::transaction::parse_date;
use crate::services::TransactionService;
use crate::storage::Storage;

use super::parse_month_arg;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and category breakdown for a month
    Summary {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        month: Option<String>,

        /// Export the category breakdown to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also list the N largest expense categories
        #[arg(long)]
        top: Option<usize>,
    },

    /// Financial health score and recommendations
    Health {
        /// Month whose income and expenses are scored
        #[arg(short, long)]
        month: Option<String>,

        /// Override monthly income
        #[arg(long)]
        income: Option<String>,

        /// Override monthly expenses
        #[arg(long)]
        expenses: Option<String>,

        /// Override savings (defaults to the current balance)
        #[arg(long)]
        savings: Option<String>,
    },

    /// Compare recent daily spending with the preceding period
    Trend {
        /// Window size in days (defaults to the configured period)
        #[arg(short, long)]
        period: Option<usize>,

        /// Last day of the analysis (defaults to today)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Bar chart of a month's spending by category
    Chart {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { month, output, top } => {
            let month = parse_month_arg(month.as_deref())?;
            let transactions = storage.transactions.get_all()?;
            let summary = MonthlySummary::for_month(&transactions, month);

            print!("{}", summary.format_terminal(symbol));

            if let Some(top) = top {
                println!("\nTop {} categories:", top);
                for (rank, entry) in summary.top_categories(top).iter().enumerate() {
                    println!(
                        "  {}. {:<25} {:>12}",
                        rank + 1,
                        entry.category,
                        entry.amount.format_with_symbol(symbol)
                    );
                }
            }

            if let Some(output) = output {
                let file = File::create(&output).map_err(|e| {
                    TrackerError::Export(format!(
                        "Failed to create file {}: {}",
                        output.display(),
                        e
                    ))
                })?;
                summary.export_csv(BufWriter::new(file))?;
                println!("\nSummary exported to: {}", output.display());
            }
        }

        ReportCommands::Health {
            month,
            income,
            expenses,
            savings,
        } => {
            let month = parse_month_arg(month.as_deref())?;
            let mut inputs = HealthInputs::for_month(storage, month)?;

            if let Some(income) = income {
                inputs.income = parse_money(&income)?;
            }
            if let Some(expenses) = expenses {
                inputs.expenses = parse_money(&expenses)?;
            }
            if let Some(savings) = savings {
                inputs.savings = parse_money(&savings)?;
            }

            println!("Scoring {}", month.friendly());
            print!("{}", inputs.score().format_terminal());
        }

        ReportCommands::Trend { period, end } => {
            let end_date = match end {
                Some(end) => parse_date(&end)?,
                None => Local::now().date_naive(),
            };
            let period = period.unwrap_or(settings.trend_period_days);

            let transactions = storage.transactions.get_all()?;
            let trend = SpendingTrend::generate(&transactions, end_date, period)?;
            print!("{}", trend.format_terminal(symbol));
        }

        ReportCommands::Chart { month } => {
            let month = parse_month_arg(month.as_deref())?;
            let transactions = storage.transactions.get_all()?;
            let summary = MonthlySummary::for_month(&transactions, month);
            print!(
                "{}",
                format_spending_chart(&summary, settings.chart_width, symbol)
            );
        }
    }

    Ok(())
}

/// The three figures the health score is computed from
#[derive(Debug, Clone, Copy)]
pub struct HealthInputs {
    pub income: Money,
    pub expenses: Money,
    pub savings: Money,
}

impl HealthInputs {
    /// Income and expenses of `month`, with the all-time balance as savings
    pub fn for_month(storage: &Storage, month: Month) -> TrackerResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let summary = MonthlySummary::for_month(&transactions, month);

        Ok(Self {
            income: summary.income,
            expenses: summary.expenses,
            savings: TransactionService::new(storage).balance()?,
        })
    }

    pub fn score(&self) -> HealthScore {
        HealthScore::calculate(self.income, self.expenses, self.savings)
    }
}

fn parse_money(input: &str) -> TrackerResult<Money> {
    Money::parse(input).map_err(|e| TrackerError::Validation(e.to_string()))
}
