//! Recurring template CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_template_list;
use crate::error::{LedgerError, LedgerResult};
use crate::services::{NewTemplate, RecurringService};
use crate::storage::Storage;

/// Recurring template subcommands
#[derive(Subcommand, Debug)]
pub enum RecurringCommands {
    /// Add a template that stamps a record every day or month
    Add {
        /// daily or monthly
        frequency: String,
        /// Transaction type: Sale, Expense, ...
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Amount due per record
        amount: String,
        /// Category or job type
        #[arg(short = 'C', long, default_value = "")]
        category: String,
        /// Client or customer name
        #[arg(short, long)]
        client: Option<String>,
        /// Note copied onto each record
        #[arg(short, long)]
        note: Option<String>,
        /// Payment method
        #[arg(short = 'm', long)]
        payment_method: Option<String>,
        /// Last date a record is produced (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
    },
    /// List templates
    List,
    /// Remove a template (records already produced are kept)
    Remove {
        /// Template id (rec-1a2b3c4d)
        id: String,
        /// Confirm removal
        #[arg(long)]
        yes: bool,
    },
}

pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecurringCommands,
) -> LedgerResult<()> {
    let service = RecurringService::new(storage);

    match cmd {
        RecurringCommands::Add {
            frequency,
            kind,
            amount,
            category,
            client,
            note,
            payment_method,
            end_date,
        } => {
            let template = service.add(NewTemplate {
                frequency,
                kind,
                category,
                amount_due: amount,
                client,
                note,
                payment_method,
                end_date,
            })?;
            println!("Added recurring template: {} ({})", template.id, template);
        }
        RecurringCommands::List => {
            print!(
                "{}",
                format_template_list(&service.list()?, &settings.currency_symbol)
            );
        }
        RecurringCommands::Remove { id, yes } => {
            if !yes {
                return Err(LedgerError::Validation(format!(
                    "Refusing to remove template {} without --yes",
                    id
                )));
            }
            let removed = service.remove(&id)?;
            println!("Removed recurring template: {}", removed.id);
        }
    }

    Ok(())
}
