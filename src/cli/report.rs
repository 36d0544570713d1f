//! Report CLI commands: `summary`, `clients` and `chart`

use crate::config::Settings;
use crate::display::{format_client_table, format_monthly_chart};
use crate::error::LedgerResult;
use crate::services::TransactionService;
use crate::storage::Storage;

use super::filter::FilterArgs;

pub fn handle_summary(
    storage: &Storage,
    settings: &Settings,
    filter: &FilterArgs,
) -> LedgerResult<()> {
    let summary = TransactionService::new(storage).summarize(&filter.to_criteria()?)?;
    print!("{}", summary.format_terminal(&settings.currency_symbol));
    Ok(())
}

pub fn handle_clients(
    storage: &Storage,
    settings: &Settings,
    filter: &FilterArgs,
) -> LedgerResult<()> {
    let summary = TransactionService::new(storage).summarize(&filter.to_criteria()?)?;
    print!(
        "{}",
        format_client_table(&summary.by_client, &settings.currency_symbol)
    );
    Ok(())
}

pub fn handle_chart(
    storage: &Storage,
    settings: &Settings,
    filter: &FilterArgs,
    width: Option<usize>,
) -> LedgerResult<()> {
    let summary = TransactionService::new(storage).summarize(&filter.to_criteria()?)?;
    print!(
        "{}",
        format_monthly_chart(
            &summary.by_month,
            width.unwrap_or(settings.chart_width),
            &settings.currency_symbol,
        )
    );
    Ok(())
}
