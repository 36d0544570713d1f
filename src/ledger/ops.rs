//! Pure collection edits
//!
//! These return a new collection and leave the caller's copy untouched; the
//! caller decides whether to keep and persist the result.

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

/// Convert a user-supplied position into an index of a collection of `len` items
pub fn checked_index(index: i64, len: usize) -> LedgerResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| LedgerError::index_out_of_range(index, len))
}

/// Mark the record at `index` as fully paid
pub fn mark_paid(records: &[Transaction], index: usize) -> LedgerResult<Vec<Transaction>> {
    if index >= records.len() {
        return Err(LedgerError::index_out_of_range(index as i64, records.len()));
    }

    let mut updated = records.to_vec();
    updated[index].amount_paid = Some(updated[index].amount_due);
    Ok(updated)
}

/// Remove the record at `index`
pub fn delete_at(records: &[Transaction], index: usize) -> LedgerResult<Vec<Transaction>> {
    if index >= records.len() {
        return Err(LedgerError::index_out_of_range(index as i64, records.len()));
    }

    let mut updated = records.to_vec();
    updated.remove(index);
    Ok(updated)
}
