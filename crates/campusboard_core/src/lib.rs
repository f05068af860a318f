//! Core list logic for the campus portal.
//! This crate owns record normalization, filtering, ordering and tab counts
//! for every portal list view; I/O stays behind the `RecordSource` seam.

pub mod domain;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod service;
pub mod source;
pub mod view;

pub use domain::config::{
    preset_names, CategorySpec, DomainConfig, DomainConfigError, DomainValidationError,
    SortPolicy, ALL_SELECTOR,
};
pub use ingest::payload::{decode_collection, decode_created, normalize_record, PayloadError};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LoggingConfig, LoggingError,
};
pub use model::record::{parse_timestamp, Record, RecordId};
pub use service::collection_service::{
    CollectionService, RefreshOutcome, RefreshTicket, RefreshTracker, RefreshTrigger,
    SubmitError,
};
pub use source::draft::{DraftError, RecordDraft};
pub use source::record_source::{JsonFileSource, RecordSource, SourceError, SourceResult};
pub use source::session::Session;
pub use view::counts::{compute_category_counts, compute_kind_counts, CategoryCount, CategoryCounts};
pub use view::filter::{filter, FilterState, Selection};
pub use view::sort::sort;
pub use view::viewer::{CollectionViewer, ViewSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
