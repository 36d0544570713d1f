//! Filter options shared by every command that works on a selection

use clap::Args;

use crate::error::LedgerResult;
use crate::ledger::{FilterCriteria, RecurrenceFilter};
use crate::models::TransactionType;
use crate::services::parse_date;

/// Record selection flags; all optional, all combined with AND
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Only this transaction type (Sale, Expense, ...)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Only this category / job type (exact match)
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Case-insensitive text to find in note or client
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Only recurring records
    #[arg(long, conflicts_with = "one_time")]
    pub recurring: bool,

    /// Only one-time records
    #[arg(long)]
    pub one_time: bool,

    /// Only records not yet paid in full
    #[arg(long)]
    pub outstanding: bool,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> LedgerResult<FilterCriteria> {
        let mut criteria = FilterCriteria::new();

        if let Some(from) = &self.from {
            criteria = criteria.since(parse_date("From date", from)?);
        }
        if let Some(to) = &self.to {
            criteria = criteria.until(parse_date("To date", to)?);
        }
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.trim().is_empty()) {
            criteria = criteria.kind(TransactionType::parse(kind));
        }
        if let Some(category) = &self.category {
            criteria = criteria.category(category.as_str());
        }
        if let Some(keyword) = &self.keyword {
            criteria = criteria.keyword(keyword.as_str());
        }
        if self.recurring {
            criteria = criteria.recurrence(RecurrenceFilter::Recurring);
        } else if self.one_time {
            criteria = criteria.recurrence(RecurrenceFilter::OneTime);
        }
        if self.outstanding {
            criteria = criteria.outstanding_only();
        }

        Ok(criteria)
    }
}
