use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use service_ledger::cli::{
    handle_add, handle_audit, handle_chart, handle_clear, handle_clients, handle_config_command,
    handle_export_command, handle_import, handle_list, handle_paid, handle_recurring_command,
    handle_remove, handle_show, handle_summary, AddArgs, ConfigCommands, ExportCommands,
    FilterArgs, RecurringCommands, TargetArgs,
};
use service_ledger::config::{paths::LedgerPaths, settings::Settings};
use service_ledger::services::{parse_date, RecurringService};
use service_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Ledger for a small service business",
    long_about = "Record sales, expenses, deposits, refunds and recurring jobs; \
                  filter and summarize them by client and month; export CSV."
)]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, hide = true, env = "LEDGER_TODAY")]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a transaction
    Add(AddArgs),

    /// List transactions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one transaction
    Show {
        /// Transaction id
        id: String,
    },

    /// Mark a transaction as paid in full
    Paid(TargetArgs),

    /// Delete a transaction
    #[command(alias = "rm")]
    Remove {
        #[command(flatten)]
        target: TargetArgs,
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Delete every transaction
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Recurring template commands
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Totals by type, due/paid and net
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Per-client totals
    Clients {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Bar chart of monthly net totals
    Chart {
        #[command(flatten)]
        filter: FilterArgs,
        /// Width of the longest bar
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Replace all data with a JSON export
    Import {
        file: std::path::PathBuf,
        /// Confirm replacing existing data
        #[arg(long)]
        yes: bool,
    },

    /// Show the most recent audit log entries, newest first
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },

    /// Show paths and settings, or change a setting
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LEDGER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let today: NaiveDate = match cli.today.as_deref() {
        Some(date) => parse_date("Today", date)?,
        None => chrono::Local::now().date_naive(),
    };

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Config { command }) => {
            handle_config_command(&paths, &mut settings, command)?;
            return Ok(());
        }
        Some(Commands::Audit { count }) => {
            handle_audit(&paths, count)?;
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("ledger - bookkeeping for a small service business");
            println!();
            println!("Run 'ledger --help' for usage information.");
            return Ok(());
        }
    };

    // Initialize storage
    let mut storage = Storage::new(&paths)?;
    if !settings.audit_enabled {
        storage = storage.without_audit();
    }

    let report = storage.load_all()?;
    if report.transactions.is_recovered() {
        warn!("transactions could not be read and were reset: {}", report.transactions);
    }
    if report.templates.is_recovered() {
        warn!("recurring templates could not be read and were reset: {}", report.templates);
    }

    RecurringService::new(&storage).materialize(today)?;

    match command {
        Commands::Add(args) => handle_add(&storage, &settings, args, today)?,
        Commands::List { filter, limit } => handle_list(&storage, &settings, &filter, limit)?,
        Commands::Show { id } => handle_show(&storage, &settings, &id)?,
        Commands::Paid(target) => handle_paid(&storage, &settings, &target)?,
        Commands::Remove { target, yes } => handle_remove(&storage, &target, yes)?,
        Commands::Clear { yes } => handle_clear(&storage, yes)?,
        Commands::Recurring(cmd) => handle_recurring_command(&storage, &settings, cmd)?,
        Commands::Summary { filter } => handle_summary(&storage, &settings, &filter)?,
        Commands::Clients { filter } => handle_clients(&storage, &settings, &filter)?,
        Commands::Chart { filter, width } => handle_chart(&storage, &settings, &filter, width)?,
        Commands::Export(cmd) => handle_export_command(&storage, &settings, &paths, cmd, today)?,
        Commands::Import { file, yes } => handle_import(&storage, &file, yes)?,
        Commands::Config { .. } | Commands::Audit { .. } => {}
    }

    Ok(())
}
