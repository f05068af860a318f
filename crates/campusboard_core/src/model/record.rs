//! Record domain model.
//!
//! # Responsibility
//! - Define the canonical record used for filtering, sorting and counting.
//! - Parse the timestamp shapes the portal backends emit.
//!
//! # Invariants
//! - `category` is stored verbatim; enumeration membership is decided by the
//!   domain config, never at construction.
//! - A missing `timestamp` orders as the oldest possible instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Stable identifier assigned by the remote store.
///
/// Relational backends hand out integers, document stores hand out strings;
/// both are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One displayable item of a portal list (announcement, lost item, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identity. Not deduplicated by core.
    pub id: RecordId,
    /// Raw category value. Empty when the source omitted it.
    pub category: String,
    /// Secondary classification (`lost|found`, `student|faculty`).
    pub kind: Option<String>,
    /// Free-text fields matched by search, in domain order.
    pub search_fields: Vec<String>,
    pub pinned: bool,
    pub urgent: bool,
    /// Unix epoch milliseconds (UTC).
    pub timestamp: Option<i64>,
    /// Full server object, passed through for rendering.
    pub payload: Value,
}

impl Record {
    /// Creates a record with no text, flags or timestamp.
    pub fn new(id: impl Into<RecordId>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            kind: None,
            search_fields: Vec::new(),
            pinned: false,
            urgent: false,
            timestamp: None,
            payload: Value::Null,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_search_field(mut self, text: impl Into<String>) -> Self {
        self.search_fields.push(text.into());
        self
    }

    pub fn with_timestamp(mut self, epoch_ms: i64) -> Self {
        self.timestamp = Some(epoch_ms);
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }

    /// Search fields joined by a single space.
    ///
    /// Matching never runs against this value; it exists for display and
    /// diagnostics.
    pub fn searchable_text(&self) -> String {
        self.search_fields.join(" ")
    }

    /// Sort key used for recency ordering.
    pub fn sort_timestamp(&self) -> i64 {
        self.timestamp.unwrap_or(i64::MIN)
    }
}

/// Parses a backend timestamp into Unix epoch milliseconds.
///
/// Accepts RFC 3339, `YYYY-MM-DD`, and naive date-times separated by `T` or a
/// space. Naive values are read as UTC. Returns `None` for anything else.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.timestamp_millis());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}
