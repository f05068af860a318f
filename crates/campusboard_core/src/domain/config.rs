//! Domain configuration declaration, presets and validation.
//!
//! # Responsibility
//! - Parametrize the generic collection viewer with a closed category set,
//!   optional kind set, searchable fields, priority flags and sort policy.
//! - Load custom domains from JSON and reject malformed declarations.
//!
//! # Invariants
//! - Category and kind ids are unique within their set.
//! - `all` is reserved for the "no filter" selector and never declared.
//! - Kinds are only declared when a kind field is configured.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Selector value meaning "do not filter".
pub const ALL_SELECTOR: &str = "all";

static CATEGORY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid category id regex"));

const PRESET_NAMES: &[&str] = &[
    "announcements",
    "lost_found",
    "skills",
    "tech_news",
    "complaints",
];

/// Returns the names accepted by [`DomainConfig::preset`].
pub fn preset_names() -> &'static [&'static str] {
    PRESET_NAMES
}

/// Presentation ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Pinned records first, then most recent first.
    PinnedThenNewest,
    /// Most recent first.
    NewestFirst,
    /// Keep source order.
    #[default]
    Insertion,
}

/// One member of a closed classification set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Exact value matched against record data (case-sensitive).
    pub id: String,
    /// Human-readable tab label.
    pub label: String,
}

impl CategorySpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Configuration for one portal list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Stable domain name, used in log events.
    pub name: String,
    /// Candidate id fields, first present wins.
    #[serde(default = "default_id_fields")]
    pub id_fields: Vec<String>,
    #[serde(default = "default_category_field")]
    pub category_field: String,
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
    #[serde(default)]
    pub kind_field: Option<String>,
    #[serde(default)]
    pub kinds: Vec<CategorySpec>,
    /// Free-text fields matched by search, in display order.
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub pinned_field: Option<String>,
    #[serde(default)]
    pub urgent_field: Option<String>,
    #[serde(default)]
    pub timestamp_field: Option<String>,
    #[serde(default)]
    pub sort: SortPolicy,
    /// Form fields that must be present and non-blank before create.
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// Field wrapping the created object in create responses, if any.
    #[serde(default)]
    pub created_envelope: Option<String>,
}

impl DomainConfig {
    /// Creates a domain with default id/category fields and no extras.
    pub fn new(name: impl Into<String>, search_fields: &[&str]) -> Self {
        Self {
            name: name.into(),
            id_fields: default_id_fields(),
            category_field: default_category_field(),
            categories: Vec::new(),
            kind_field: None,
            kinds: Vec::new(),
            search_fields: to_strings(search_fields),
            pinned_field: None,
            urgent_field: None,
            timestamp_field: None,
            sort: SortPolicy::Insertion,
            required_fields: Vec::new(),
            created_envelope: None,
        }
    }

    /// Campus announcements: pinned-first, newest-first.
    pub fn announcements() -> Self {
        let mut config = Self::new("announcements", &["title", "content"]);
        config.categories = vec![
            CategorySpec::new("exams", "Exams"),
            CategorySpec::new("events", "Events"),
            CategorySpec::new("holidays", "Holidays"),
            CategorySpec::new("academic", "Academic"),
            CategorySpec::new("placements", "Placements"),
        ];
        config.pinned_field = Some("pinned".to_string());
        config.urgent_field = Some("urgent".to_string());
        config.timestamp_field = Some("date".to_string());
        config.sort = SortPolicy::PinnedThenNewest;
        config.required_fields = to_strings(&["title", "content"]);
        config
    }

    /// Lost-and-found board, filtered by `lost|found` kind.
    pub fn lost_found() -> Self {
        let mut config = Self::new("lost_found", &["title", "description", "location"]);
        config.categories = vec![
            CategorySpec::new("electronics", "Electronics"),
            CategorySpec::new("personal", "Personal"),
            CategorySpec::new("vehicles", "Vehicles"),
            CategorySpec::new("books", "Books"),
            CategorySpec::new("clothing", "Clothing"),
        ];
        config.kind_field = Some("type".to_string());
        config.kinds = vec![
            CategorySpec::new("lost", "Lost Items"),
            CategorySpec::new("found", "Found Items"),
        ];
        config.timestamp_field = Some("date".to_string());
        config.required_fields =
            to_strings(&["title", "description", "location", "date", "contact"]);
        config
    }

    /// Skill exchange listings.
    pub fn skills() -> Self {
        let mut config = Self::new("skills", &["name", "description", "tutor"]);
        config.required_fields = to_strings(&["name", "description", "tutor", "email"]);
        config
    }

    /// Tech news feed. Create responses wrap the item in `news`.
    pub fn tech_news() -> Self {
        let mut config = Self::new("tech_news", &["title", "description", "author"]);
        config.timestamp_field = Some("date".to_string());
        config.required_fields = to_strings(&["title", "description", "author"]);
        config.created_envelope = Some("news".to_string());
        config
    }

    /// Complaint box, split by who filed it.
    pub fn complaints() -> Self {
        let mut config = Self::new("complaints", &["name", "message"]);
        config.kind_field = Some("userType".to_string());
        config.kinds = vec![
            CategorySpec::new("Student", "Student"),
            CategorySpec::new("Warden", "Warden"),
        ];
        config.timestamp_field = Some("date".to_string());
        config.required_fields = to_strings(&["name", "message"]);
        config
    }

    /// Looks up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim() {
            "announcements" => Some(Self::announcements()),
            "lost_found" | "lostfound" => Some(Self::lost_found()),
            "skills" => Some(Self::skills()),
            "tech_news" | "technews" => Some(Self::tech_news()),
            "complaints" => Some(Self::complaints()),
            _ => None,
        }
    }

    /// Parses and validates a JSON domain declaration.
    pub fn from_json_str(raw: &str) -> Result<Self, DomainConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(DomainConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON domain declaration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainConfigError> {
        let raw = std::fs::read_to_string(path).map_err(DomainConfigError::Io)?;
        Self::from_json_str(&raw)
    }

    /// Returns whether `category` is a declared category id.
    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|spec| spec.id == category)
    }

    /// Validates declaration-level invariants.
    pub fn validate(&self) -> Result<(), DomainValidationError> {
        if self.name.trim().is_empty() {
            return Err(DomainValidationError::EmptyName);
        }
        if self.id_fields.iter().all(|field| field.trim().is_empty()) {
            return Err(DomainValidationError::MissingIdField);
        }
        if self.search_fields.iter().all(|field| field.trim().is_empty()) {
            return Err(DomainValidationError::MissingSearchField);
        }
        if self.kind_field.is_none() && !self.kinds.is_empty() {
            return Err(DomainValidationError::KindsWithoutField);
        }

        validate_set(&self.categories)?;
        validate_set(&self.kinds)?;
        Ok(())
    }
}

fn validate_set(specs: &[CategorySpec]) -> Result<(), DomainValidationError> {
    let mut seen = BTreeSet::new();
    for spec in specs {
        if spec.id == ALL_SELECTOR {
            return Err(DomainValidationError::ReservedCategoryId);
        }
        if !CATEGORY_ID_RE.is_match(&spec.id) {
            return Err(DomainValidationError::InvalidCategoryId(spec.id.clone()));
        }
        if !seen.insert(spec.id.as_str()) {
            return Err(DomainValidationError::DuplicateCategory(spec.id.clone()));
        }
    }
    Ok(())
}

fn default_id_fields() -> Vec<String> {
    to_strings(&["id", "_id"])
}

fn default_category_field() -> String {
    "category".to_string()
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Declaration-level domain validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainValidationError {
    EmptyName,
    MissingIdField,
    MissingSearchField,
    InvalidCategoryId(String),
    DuplicateCategory(String),
    ReservedCategoryId,
    KindsWithoutField,
}

impl Display for DomainValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "domain name must not be empty"),
            Self::MissingIdField => write!(f, "domain must declare at least one id field"),
            Self::MissingSearchField => {
                write!(f, "domain must declare at least one search field")
            }
            Self::InvalidCategoryId(value) => write!(f, "category id is invalid: `{value}`"),
            Self::DuplicateCategory(value) => write!(f, "category id is duplicated: `{value}`"),
            Self::ReservedCategoryId => {
                write!(f, "category id `{ALL_SELECTOR}` is reserved")
            }
            Self::KindsWithoutField => write!(f, "kinds declared without a kind_field"),
        }
    }
}

impl Error for DomainValidationError {}

/// Error for loading a domain declaration from JSON.
#[derive(Debug)]
pub enum DomainConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(DomainValidationError),
}

impl Display for DomainConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read domain config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse domain config: {err}"),
            Self::Invalid(err) => write!(f, "invalid domain config: {err}"),
        }
    }
}

impl Error for DomainConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<DomainValidationError> for DomainConfigError {
    fn from(value: DomainValidationError) -> Self {
        Self::Invalid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{preset_names, CategorySpec, DomainConfig, DomainValidationError, SortPolicy};

    #[test]
    fn every_preset_is_valid() {
        for name in preset_names() {
            let config = DomainConfig::preset(name).expect("preset should exist");
            assert!(config.validate().is_ok(), "preset `{name}` failed");
            assert_eq!(config.name, *name);
        }
    }

    #[test]
    fn announcements_preset_pins_and_sorts_by_date() {
        let config = DomainConfig::announcements();
        assert_eq!(config.sort, SortPolicy::PinnedThenNewest);
        assert_eq!(config.pinned_field.as_deref(), Some("pinned"));
        assert_eq!(config.categories.len(), 5);
        assert!(config.is_known_category("placements"));
        assert!(!config.is_known_category("Placements"));
    }

    #[test]
    fn rejects_reserved_all_category() {
        let mut config = DomainConfig::announcements();
        config.categories.push(CategorySpec::new("all", "Everything"));
        assert_eq!(
            config.validate().unwrap_err(),
            DomainValidationError::ReservedCategoryId
        );
    }

    #[test]
    fn rejects_duplicate_category() {
        let mut config = DomainConfig::lost_found();
        config.categories.push(CategorySpec::new("books", "Books again"));
        assert_eq!(
            config.validate().unwrap_err(),
            DomainValidationError::DuplicateCategory("books".to_string())
        );
    }

    #[test]
    fn rejects_invalid_category_id() {
        let mut config = DomainConfig::skills();
        config.categories.push(CategorySpec::new("two words", "Two"));
        assert!(matches!(
            config.validate().unwrap_err(),
            DomainValidationError::InvalidCategoryId(_)
        ));
    }

    #[test]
    fn rejects_kinds_without_kind_field() {
        let mut config = DomainConfig::skills();
        config.kinds.push(CategorySpec::new("online", "Online"));
        assert_eq!(
            config.validate().unwrap_err(),
            DomainValidationError::KindsWithoutField
        );
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(DomainConfig::preset("timetable").is_none());
    }
}
