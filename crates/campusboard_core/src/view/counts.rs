//! Per-tab record counts.

use crate::domain::config::{CategorySpec, DomainConfig, ALL_SELECTOR};
use crate::model::record::Record;

const ALL_LABEL: &str = "All";

/// One tab entry with its label and record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: String,
    pub label: String,
    pub count: usize,
}

/// Tab counts in declaration order, led by the `all` bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<CategoryCount>,
}

impl CategoryCounts {
    /// Total number of records, including unrecognized categories.
    pub fn all(&self) -> usize {
        self.get(ALL_SELECTOR).unwrap_or(0)
    }

    /// Count for one declared id, or `None` when the id is not declared.
    pub fn get(&self, id: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counts records per declared category plus the `all` bucket.
///
/// Matching is exact and case-sensitive. Records with an undeclared category
/// contribute only to `all`.
pub fn compute_category_counts(config: &DomainConfig, records: &[Record]) -> CategoryCounts {
    count_by(&config.categories, records, |record| Some(record.category.as_str()))
}

/// Counts records per declared kind plus the `all` bucket.
pub fn compute_kind_counts(config: &DomainConfig, records: &[Record]) -> CategoryCounts {
    count_by(&config.kinds, records, |record| record.kind.as_deref())
}

fn count_by<F>(specs: &[CategorySpec], records: &[Record], key: F) -> CategoryCounts
where
    F: Fn(&Record) -> Option<&str>,
{
    let mut entries = Vec::with_capacity(specs.len() + 1);
    entries.push(CategoryCount {
        id: ALL_SELECTOR.to_string(),
        label: ALL_LABEL.to_string(),
        count: records.len(),
    });
    for spec in specs {
        let count = records
            .iter()
            .filter(|record| key(*record) == Some(spec.id.as_str()))
            .count();
        entries.push(CategoryCount {
            id: spec.id.clone(),
            label: spec.label.clone(),
            count,
        });
    }
    CategoryCounts { entries }
}
