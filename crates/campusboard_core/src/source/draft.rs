//! Create-form payloads.

use crate::domain::config::DomainConfig;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form draft validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Required field is absent, null or blank.
    MissingField(String),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field is missing: `{field}`"),
        }
    }
}

impl Error for DraftError {}

/// Field values collected by a create form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    fields: Map<String, Value>,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one field, replacing any previous value.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Checks the domain's required fields.
    ///
    /// Strings must be non-blank after trim; `null` counts as missing.
    pub fn validate(&self, config: &DomainConfig) -> Result<(), DraftError> {
        for field in &config.required_fields {
            let present = match self.fields.get(field) {
                None | Some(Value::Null) => false,
                Some(Value::String(text)) => !text.trim().is_empty(),
                Some(_) => true,
            };
            if !present {
                return Err(DraftError::MissingField(field.clone()));
            }
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for RecordDraft {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
