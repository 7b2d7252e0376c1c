//! Exact full-row deduplication.

use crate::models::CatalogRecord;
use std::collections::HashSet;
use tracing::debug;

/// Drop rows identical to an earlier row, nulls included.
///
/// The first occurrence of each row survives and survivors keep their
/// relative order. Returns the survivors and the number of rows removed.
pub fn deduplicate_records(records: &[CatalogRecord]) -> (Vec<CatalogRecord>, usize) {
    let mut seen: HashSet<&CatalogRecord> = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record) {
            unique.push(record.clone());
        }
    }

    let removed = records.len() - unique.len();
    debug!(
        "Deduplication removed {} of {} rows",
        removed,
        records.len()
    );

    (unique, removed)
}
