//! Selector and free-text filtering.

use crate::domain::config::ALL_SELECTOR;
use crate::model::record::Record;

/// Tab selector state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    /// Exact, case-sensitive match.
    Only(String),
}

impl Selection {
    /// Parses a UI selector value; `"all"` means no filter.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SELECTOR {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected.as_str()),
        }
    }
}

/// Current UI filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Raw search box text. Empty matches everything.
    pub search_term: String,
    pub category: Selection,
    pub kind: Selection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, selector: &str) -> Self {
        self.category = Selection::parse(selector);
        self
    }

    pub fn with_kind(mut self, selector: &str) -> Self {
        self.kind = Selection::parse(selector);
        self
    }
}

/// Applies category, kind and text filters, preserving input order.
///
/// The text filter matches when the lowercased term is a substring of any
/// single lowercased search field.
pub fn filter<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    let needle = state.search_term.to_lowercase();
    records
        .iter()
        .filter(|record| state.category.matches(Some(record.category.as_str())))
        .filter(|record| state.kind.matches(record.kind.as_deref()))
        .filter(|record| matches_text(record, &needle))
        .collect()
}

fn matches_text(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
