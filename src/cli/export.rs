//! CLI commands for data export and restore

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{ExportService, TransactionService};
use crate::storage::Storage;

use super::filter::FilterArgs;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the selected transactions as CSV
    Csv {
        /// Directory for ledger-<date>.csv (defaults to the exports directory)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the CSV instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Append the totals block
        #[arg(long, conflicts_with = "no_totals")]
        totals: bool,

        /// Leave out the totals block
        #[arg(long)]
        no_totals: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export every transaction and template as JSON
    Json {
        /// Output file (prints to stdout when omitted)
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    paths: &LedgerPaths,
    cmd: ExportCommands,
    today: NaiveDate,
) -> LedgerResult<()> {
    let service = ExportService::new(storage);

    match cmd {
        ExportCommands::Csv {
            output,
            stdout,
            totals,
            no_totals,
            filter,
        } => {
            let include_totals = if totals {
                true
            } else if no_totals {
                false
            } else {
                settings.export_include_totals
            };

            let records = TransactionService::new(storage).list(&filter.to_criteria()?)?;

            if stdout {
                service.csv_to_writer(&records, include_totals, io::stdout().lock())?;
            } else {
                let dir = output.unwrap_or_else(|| paths.export_dir());
                let path = service.csv_to_dir(&records, include_totals, &dir, today)?;
                println!("Exported {} transactions to: {}", records.len(), path.display());
            }
        }
        ExportCommands::Json { output, pretty } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                let mut writer = BufWriter::new(file);
                service.json_to_writer(&mut writer, pretty)?;
                println!("Full ledger exported to: {}", path.display());
            }
            None => {
                {
                    let mut writer = io::stdout().lock();
                    service.json_to_writer(&mut writer, pretty)?;
                }
                println!();
            }
        },
    }

    Ok(())
}

/// Replace all data with a JSON export
pub fn handle_import(storage: &Storage, file: &Path, yes: bool) -> LedgerResult<()> {
    if !yes {
        return Err(LedgerError::Validation(
            "Importing replaces every transaction and template; pass --yes to continue".into(),
        ));
    }

    let json = std::fs::read_to_string(file)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", file.display(), e)))?;
    let (transactions, templates) = ExportService::new(storage).restore_json(&json)?;

    println!(
        "Imported {} transactions and {} recurring templates from {}",
        transactions,
        templates,
        file.display()
    );
    Ok(())
}
