use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_budget_command, handle_export_command, handle_report_command,
    handle_transaction_command, run_menu, BudgetCommands, ExportCommands, ReportCommands,
    TransactionCommands,
};
use finance_tracker::config::paths::{TrackerPaths, DATA_DIR_ENV};
use finance_tracker::config::settings::Settings;
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker with budget alerts and health scoring",
    long_about = "fintrack records income and expenses, tracks spending against \
                  monthly category limits, and reports on your financial health. \
                  Run it without a subcommand for the interactive menu."
)]
struct Cli {
    /// Directory holding all tracker data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu
    Menu,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports and analytics
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV or JSON
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        None | Some(Commands::Menu) => {
            run_menu(&storage, &settings, io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Audit { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Chart width:       {}", settings.chart_width);
            println!("  Trend period days: {}", settings.trend_period_days);
            println!("  Audit enabled:     {}", settings.audit_enabled);
        }
    }

    Ok(())
}
