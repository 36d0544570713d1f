//! Recurring template display formatting

use crate::models::RecurringTemplate;

use super::report::{format_money, separator, truncate};

pub fn format_template_list(templates: &[RecurringTemplate], currency: &str) -> String {
    if templates.is_empty() {
        return "No recurring templates.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:8} {:10} {:14} {:16} {:>12} {}\n",
        "Id", "Every", "Type", "Category", "Client", "Amount", "Until"
    ));
    output.push_str(&separator(90));
    output.push('\n');

    for template in templates {
        output.push_str(&format!(
            "{} {:8} {} {} {} {:>12} {}\n",
            template.id,
            template.frequency.to_string(),
            truncate(template.kind.as_str(), 10),
            truncate(&template.category, 14),
            truncate(template.client.as_deref().unwrap_or("-"), 16),
            format_money(template.amount_due, currency),
            template
                .end_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money, TransactionType};
    use chrono::NaiveDate;

    #[test]
    fn test_template_list() {
        let mut template = RecurringTemplate::new(
            Frequency::Daily,
            TransactionType::Sale,
            "Dog walk",
            Money::from_cents(2500),
        );
        template.end_date = NaiveDate::from_ymd_opt(2024, 6, 30);

        let output = format_template_list(&[template.clone()], "$");
        assert!(output.contains(&template.id.to_string()));
        assert!(output.contains("daily"));
        assert!(output.contains("$25.00"));
        assert!(output.contains("2024-06-30"));
    }

    #[test]
    fn test_empty_template_list() {
        assert_eq!(format_template_list(&[], "$"), "No recurring templates.\n");
    }
}
