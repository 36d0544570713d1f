//! Text bar chart of monthly net totals
//!
//! Months with net income draw a bar to the right of the axis, months with a
//! net expense draw one to the left. Bars are scaled to the largest absolute
//! month.

use std::collections::BTreeMap;

use crate::models::Money;

use super::report::format_money;

fn bar_len(amount: Money, max: i64, width: usize) -> usize {
    if max == 0 || amount.is_zero() {
        return 0;
    }
    let len = (amount.cents().unsigned_abs() as f64 / max as f64 * width as f64).round() as usize;
    len.clamp(1, width)
}

/// Render `by_month` (`YYYY-MM` to signed total) as a bar chart
pub fn format_monthly_chart(
    by_month: &BTreeMap<String, Money>,
    width: usize,
    currency: &str,
) -> String {
    if by_month.is_empty() {
        return "No data to chart.\n".to_string();
    }

    let width = width.max(1);
    let max = by_month
        .values()
        .map(|m| m.cents().abs())
        .max()
        .unwrap_or(0);
    let any_negative = by_month.values().any(|m| m.is_negative());
    let left = if any_negative { width } else { 0 };

    let mut output = String::new();
    for (month, total) in by_month {
        let len = bar_len(*total, max, width);
        let (neg, pos) = if total.is_negative() {
            ("█".repeat(len), String::new())
        } else {
            (String::new(), "█".repeat(len))
        };

        let line = format!(
            "{} {:>left$}│{:<width$} {:>12}",
            month,
            neg,
            pos,
            format_money(*total, currency),
            left = left,
            width = width,
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(values: &[(&str, i64)]) -> BTreeMap<String, Money> {
        values
            .iter()
            .map(|(m, c)| (m.to_string(), Money::from_cents(*c)))
            .collect()
    }

    #[test]
    fn test_bars_scale_to_largest_month() {
        let output = format_monthly_chart(&months(&[("2024-01", 6000), ("2024-02", 3000)]), 10, "$");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0].matches('█').count(), 10);
        assert_eq!(lines[1].matches('█').count(), 5);
        assert!(lines[0].starts_with("2024-01 │"));
        assert!(lines[0].ends_with("$60.00"));
    }

    #[test]
    fn test_negative_month_draws_left_of_axis() {
        let output = format_monthly_chart(&months(&[("2024-01", 4000), ("2024-02", -2000)]), 4, "$");
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].contains("    │████"));
        assert!(lines[1].contains("  ██│"));
        assert!(lines[1].ends_with("-$20.00"));
    }

    #[test]
    fn test_zero_month_has_no_bar() {
        let output = format_monthly_chart(&months(&[("2024-01", 0), ("2024-02", 100)]), 5, "$");
        assert_eq!(output.lines().next().unwrap().matches('█').count(), 0);
    }

    #[test]
    fn test_empty_chart() {
        assert_eq!(format_monthly_chart(&BTreeMap::new(), 10, "$"), "No data to chart.\n");
    }
}
