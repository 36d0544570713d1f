//! Client report table

use std::collections::BTreeMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::ledger::ClientSummary;

use super::report::format_money;

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Client")]
    name: String,
    #[tabled(rename = "Jobs")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Average")]
    average: String,
    #[tabled(rename = "Last")]
    last: String,
}

/// Format per-client totals as a table, largest total first
pub fn format_client_table(clients: &BTreeMap<String, ClientSummary>, currency: &str) -> String {
    if clients.is_empty() {
        return "No client activity found.\n".to_string();
    }

    let mut entries: Vec<(&String, &ClientSummary)> = clients.iter().collect();
    entries.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(b.0)));

    let rows: Vec<ClientRow> = entries
        .into_iter()
        .map(|(name, summary)| ClientRow {
            name: name.clone(),
            count: summary.count,
            total: format_money(summary.total, currency),
            average: format_money(summary.average(), currency),
            last: summary.last_date.format("%Y-%m-%d").to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));

    format!("{}\n", table)
}
