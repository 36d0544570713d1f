//! Shared formatting helpers for terminal output

use crate::models::Money;

/// Money with the configured currency symbol, negatives as `-$12.00`
pub fn format_money(amount: Money, currency: &str) -> String {
    amount.format_with_symbol(currency)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis, padding short input
pub fn truncate(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        format!("{:width$}", s, width = max_len)
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Jones", 8), "Jones   ");
        assert_eq!(truncate("Greenfield Landscaping", 10), "Greenfi...");
        assert_eq!(truncate("Café Müller GmbH", 8), "Café ...");
    }
}
