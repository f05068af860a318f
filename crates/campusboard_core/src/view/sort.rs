//! Presentation ordering.

use crate::domain::config::SortPolicy;
use crate::model::record::Record;
use std::cmp::Ordering;

/// Orders filtered records for display.
///
/// Uses a stable sort, so records that compare equal keep their input order
/// and repeated calls never swap them.
pub fn sort(mut records: Vec<&Record>, policy: SortPolicy) -> Vec<&Record> {
    match policy {
        SortPolicy::PinnedThenNewest => {
            records.sort_by(|a, b| pinned_first(a, b).then_with(|| newest_first(a, b)));
        }
        SortPolicy::NewestFirst => records.sort_by(|a, b| newest_first(a, b)),
        SortPolicy::Insertion => {}
    }
    records
}

fn pinned_first(a: &Record, b: &Record) -> Ordering {
    b.pinned.cmp(&a.pinned)
}

fn newest_first(a: &Record, b: &Record) -> Ordering {
    b.sort_timestamp().cmp(&a.sort_timestamp())
}
