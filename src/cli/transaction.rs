//! Transaction CLI commands
//!
//! `add`, `list`, `show`, `paid`, `remove` and `clear`. Records are addressed
//! either by id (`txn-1a2b3c4d`) or by their row number in the list selected
//! by the same filter flags `list` takes.

use chrono::NaiveDate;
use clap::Args;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::services::{NewTransaction, TransactionService};
use crate::storage::Storage;

use super::filter::FilterArgs;

/// Arguments of `add`
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Transaction type: Sale, Expense, Deposit, Refund, Withdrawal
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// Amount due (e.g. "100" or "12.50")
    pub amount: String,

    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Client or customer name
    #[arg(short = 'c', long)]
    pub client: Option<String>,

    /// Category or job type
    #[arg(short = 'C', long, default_value = "")]
    pub category: String,

    /// Free-text note
    #[arg(short, long)]
    pub note: Option<String>,

    /// Amount already paid
    #[arg(short, long)]
    pub paid: Option<String>,

    /// Repeat the record: none, daily or monthly
    #[arg(short, long)]
    pub recurrence: Option<String>,

    /// Last date a recurring record repeats (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Payment method (cash, card, ...)
    #[arg(short = 'm', long)]
    pub payment_method: Option<String>,
}

impl AddArgs {
    pub fn into_input(self, today: NaiveDate) -> NewTransaction {
        NewTransaction {
            date: self
                .date
                .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            kind: self.kind,
            category: self.category,
            amount_due: self.amount,
            amount_paid: self.paid,
            client: self.client,
            note: self.note,
            recurrence: self.recurrence,
            end_date: self.end_date,
            payment_method: self.payment_method,
        }
    }
}

/// A record addressed by id or by row number in a filtered list
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Transaction id, or row number as shown by `list` with the same filters
    #[arg(allow_negative_numbers = true)]
    pub target: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

enum Target {
    Row(i64),
    Id(String),
}

impl TargetArgs {
    fn resolve(&self) -> Target {
        match self.target.trim().parse::<i64>() {
            Ok(index) => Target::Row(index),
            Err(_) => Target::Id(self.target.trim().to_string()),
        }
    }
}

pub fn handle_add(
    storage: &Storage,
    settings: &Settings,
    args: AddArgs,
    today: NaiveDate,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let txn = service.create(args.into_input(today))?;

    println!("Added transaction: {}", txn.id);
    print!("{}", format_transaction_details(&txn, &settings.currency_symbol));
    if txn.is_recurring() {
        println!("Recurring template registered ({}).", txn.recurrence);
    }
    Ok(())
}

pub fn handle_list(
    storage: &Storage,
    settings: &Settings,
    filter: &FilterArgs,
    limit: Option<usize>,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let records = service.list(&filter.to_criteria()?)?;

    let shown = match limit {
        Some(limit) if limit < records.len() => &records[..limit],
        _ => &records[..],
    };

    print!(
        "{}",
        format_transaction_register(shown, &settings.currency_symbol)
    );
    if shown.len() < records.len() {
        println!("({} of {} shown)", shown.len(), records.len());
    }
    Ok(())
}

pub fn handle_show(storage: &Storage, settings: &Settings, id: &str) -> LedgerResult<()> {
    let txn = TransactionService::new(storage).find(id)?;
    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol)
    );
    Ok(())
}

pub fn handle_paid(storage: &Storage, settings: &Settings, args: &TargetArgs) -> LedgerResult<()> {
    let service = TransactionService::new(storage);

    let txn = match args.resolve() {
        Target::Row(index) => {
            let displayed = service.list(&args.filter.to_criteria()?)?;
            service.mark_paid_at(&displayed, index)?
        }
        Target::Id(reference) => {
            let found = service.find(&reference)?;
            service.mark_paid(found.id)?
        }
    };

    println!(
        "Marked paid: {} ({})",
        txn.id,
        txn.paid().format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}

pub fn handle_remove(storage: &Storage, args: &TargetArgs, yes: bool) -> LedgerResult<()> {
    let service = TransactionService::new(storage);

    let target: Transaction = match args.resolve() {
        Target::Row(index) => {
            let displayed = service.list(&args.filter.to_criteria()?)?;
            let index = crate::ledger::checked_index(index, displayed.len())?;
            displayed[index].clone()
        }
        Target::Id(reference) => service.find(&reference)?,
    };

    if !yes {
        return Err(LedgerError::Validation(format!(
            "Refusing to delete {} ({}) without --yes",
            target.id, target
        )));
    }

    let removed = service.delete(target.id)?;
    println!("Deleted transaction: {} ({})", removed.id, removed);
    Ok(())
}

pub fn handle_clear(storage: &Storage, yes: bool) -> LedgerResult<()> {
    let service = TransactionService::new(storage);

    if !yes {
        let count = service.all()?.len();
        return Err(LedgerError::Validation(format!(
            "Refusing to delete all {} transactions without --yes",
            count
        )));
    }

    let removed = service.clear_all()?;
    println!("Cleared {} transactions.", removed);
    Ok(())
}
