//! CLI commands for data export

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_full_json, export_transactions_csv};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all transactions to CSV, oldest first
    Csv {
        /// Output file path (defaults to the exports directory)
        output: Option<PathBuf>,
    },

    /// Export transactions and budget as a JSON snapshot
    Json {
        /// Output file path (defaults to the exports directory)
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> TrackerResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let output = output_path(storage, output, "csv");
            let count = export_transactions_csv(storage, create_file(&output)?)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        ExportCommands::Json { output } => {
            let output = output_path(storage, output, "json");
            let export = export_full_json(storage, create_file(&output)?)?;
            println!(
                "Exported {} transactions and {} budget categories to: {}",
                export.metadata.transaction_count,
                export.metadata.budget_category_count,
                output.display()
            );
        }
    }

    Ok(())
}

/// Resolve the output path, defaulting to a timestamped file under the
/// exports directory
fn output_path(storage: &Storage, output: Option<PathBuf>, extension: &str) -> PathBuf {
    output.unwrap_or_else(|| {
        storage.paths().export_dir().join(format!(
            "transactions_{}.{}",
            Local::now().format("%Y%m%d_%H%M%S"),
            extension
        ))
    })
}

fn create_file(path: &Path) -> TrackerResult<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
