//! Transaction display formatting
//!
//! The register shows the position of each row in the displayed list; `paid`
//! and `remove` accept that position as well as an id.

use crate::models::{Recurrence, Transaction};

use super::report::{format_money, separator, truncate};

/// Status column: paid in full, partly paid, or nothing paid yet
fn status_icon(txn: &Transaction) -> &'static str {
    if !txn.is_outstanding() {
        "✓"
    } else if txn.paid().is_positive() {
        "~"
    } else {
        " "
    }
}

fn recurrence_marker(txn: &Transaction) -> &'static str {
    match txn.recurrence {
        Recurrence::Daily => "D",
        Recurrence::Monthly => "M",
        Recurrence::None => "",
    }
}

/// Format a single register row
pub fn format_transaction_row(index: usize, txn: &Transaction, currency: &str) -> String {
    format!(
        "{:>3} {} {} {} {:10} {} {} {:>12} {:>12} {}",
        index,
        status_icon(txn),
        txn.id,
        txn.date.format("%Y-%m-%d"),
        truncate(txn.kind.as_str(), 10),
        truncate(txn.client_name().unwrap_or("-"), 16),
        truncate(&txn.category, 14),
        format_money(txn.amount_due, currency),
        format_money(txn.paid(), currency),
        recurrence_marker(txn),
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3} {} {:12} {:10} {:10} {:16} {:14} {:>12} {:>12} {}\n",
        "#", "S", "Id", "Date", "Type", "Client", "Category", "Due", "Paid", "R"
    ));
    output.push_str(&separator(104));
    output.push('\n');

    for (index, txn) in transactions.iter().enumerate() {
        output.push_str(&format_transaction_row(index, txn, currency));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    if !txn.category.is_empty() {
        output.push_str(&format!("Category:    {}\n", txn.category));
    }
    if let Some(client) = txn.client_name() {
        output.push_str(&format!("Client:      {}\n", client));
    }
    output.push_str(&format!(
        "Amount due:  {}\n",
        format_money(txn.amount_due, currency)
    ));
    output.push_str(&format!(
        "Amount paid: {}\n",
        format_money(txn.paid(), currency)
    ));
    if let Some(note) = &txn.note {
        output.push_str(&format!("Note:        {}\n", note));
    }
    if txn.is_recurring() {
        output.push_str(&format!("Recurrence:  {}\n", txn.recurrence));
    }
    if let Some(end) = txn.end_date {
        output.push_str(&format!("End date:    {}\n", end));
    }
    if let Some(method) = &txn.payment_method {
        output.push_str(&format!("Payment:     {}\n", method));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        let mut txn = Transaction::with_details(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            TransactionType::Sale,
            Money::from_cents(10000),
            "Lawn",
            Some("Jones".into()),
            Some("front and back".into()),
        );
        txn.recurrence = Recurrence::Monthly;
        txn
    }

    #[test]
    fn test_register_rows_are_numbered() {
        let mut paid = sample();
        paid.amount_paid = Some(paid.amount_due);
        let output = format_transaction_register(&[sample(), paid], "$");

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].trim_start().starts_with("0 "));
        assert!(lines[3].trim_start().starts_with("1 ✓"));
        assert!(lines[2].contains("$100.00"));
        assert!(lines[2].ends_with('M'));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_register(&[], "$"), "No transactions found.\n");
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&sample(), "€");
        assert!(output.contains("Client:      Jones"));
        assert!(output.contains("Amount due:  €100.00"));
        assert!(output.contains("Recurrence:  monthly"));
        assert!(!output.contains("Payment:"));
    }
}
