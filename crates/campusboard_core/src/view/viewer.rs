//! Collection viewer facade over one working set.
//!
//! # Responsibility
//! - Own the in-memory working set for one domain.
//! - Produce presentation snapshots for the rendering collaborator.
//!
//! # Invariants
//! - `set_collection` replaces wholesale; no dedup, no validation.
//! - `add_record` prepends and never re-validates the category.
//! - Stored records are never mutated in place.

use crate::domain::config::DomainConfig;
use crate::model::record::Record;
use crate::view::counts::{compute_category_counts, compute_kind_counts, CategoryCounts};
use crate::view::filter::{filter, FilterState};
use crate::view::sort::sort;
use log::debug;

/// Presentation output for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<'a> {
    /// Filtered records in presentation order.
    pub items: Vec<&'a Record>,
    /// Counts over the whole working set, not the filtered items.
    pub category_counts: CategoryCounts,
    pub kind_counts: CategoryCounts,
}

/// Generic record collection viewer parametrized by a domain config.
#[derive(Debug, Clone)]
pub struct CollectionViewer {
    config: DomainConfig,
    records: Vec<Record>,
}

impl CollectionViewer {
    /// Creates an empty viewer for `config`.
    pub fn new(config: DomainConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    /// Working set in stored (source) order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the working set with a fresh collection.
    pub fn set_collection(&mut self, records: Vec<Record>) {
        debug!(
            "event=collection_set module=view domain={} count={}",
            self.config.name,
            records.len()
        );
        self.records = records;
    }

    /// Prepends a server-confirmed record to the working set.
    pub fn add_record(&mut self, record: Record) {
        debug!(
            "event=collection_add module=view domain={} known_category={}",
            self.config.name,
            self.config.is_known_category(&record.category)
        );
        self.records.insert(0, record);
    }

    pub fn category_counts(&self) -> CategoryCounts {
        compute_category_counts(&self.config, &self.records)
    }

    pub fn kind_counts(&self) -> CategoryCounts {
        compute_kind_counts(&self.config, &self.records)
    }

    /// Filters without reordering.
    pub fn filter(&self, state: &FilterState) -> Vec<&Record> {
        filter(&self.records, state)
    }

    /// Filters, orders and counts for one render pass.
    pub fn view(&self, state: &FilterState) -> ViewSnapshot<'_> {
        let items = sort(filter(&self.records, state), self.config.sort);
        ViewSnapshot {
            items,
            category_counts: self.category_counts(),
            kind_counts: self.kind_counts(),
        }
    }
}
