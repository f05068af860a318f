//! JSON payload decoding into records.
//!
//! # Responsibility
//! - Map one server object onto a `Record` using a `DomainConfig`.
//! - Decode full collection bodies and create-echo bodies.
//!
//! # Invariants
//! - Only a missing/unusable id rejects an object; every other field falls
//!   back to a neutral default.
//! - Duplicate ids are passed through unchanged.

use crate::domain::config::DomainConfig;
use crate::model::record::{parse_timestamp, Record, RecordId};
use serde_json::{Map, Number, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Payload decoding error.
#[derive(Debug)]
pub enum PayloadError {
    /// Body is not valid JSON.
    Json(serde_json::Error),
    /// Collection body is valid JSON but not an array.
    NotAnArray,
    /// Element at `index` is not a JSON object.
    NotAnObject { index: usize },
    /// Element at `index` carries no usable id.
    MissingId { index: usize },
    /// Create echo lacks the configured envelope field.
    MissingEnvelope(String),
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "payload is not valid json: {err}"),
            Self::NotAnArray => write!(f, "collection payload must be a json array"),
            Self::NotAnObject { index } => write!(f, "payload item {index} is not an object"),
            Self::MissingId { index } => write!(f, "payload item {index} has no usable id"),
            Self::MissingEnvelope(field) => {
                write!(f, "create response is missing envelope field `{field}`")
            }
        }
    }
}

impl Error for PayloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Decodes a collection body (JSON array of objects).
///
/// # Errors
/// - Returns an error when the body is not JSON or not an array.
/// - Returns an error for the first element that cannot become a record.
pub fn decode_collection(config: &DomainConfig, body: &str) -> Result<Vec<Record>, PayloadError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Array(items) = value else {
        return Err(PayloadError::NotAnArray);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_at(config, item, index))
        .collect()
}

/// Decodes the server echo of a create request.
///
/// Unwraps `created_envelope` first when the domain declares one.
pub fn decode_created(config: &DomainConfig, body: &str) -> Result<Record, PayloadError> {
    let value: Value = serde_json::from_str(body)?;
    let item = match config.created_envelope.as_deref() {
        Some(field) => value
            .get(field)
            .ok_or_else(|| PayloadError::MissingEnvelope(field.to_string()))?,
        None => &value,
    };
    normalize_at(config, item, 0)
}

/// Maps one JSON object onto a record.
pub fn normalize_record(config: &DomainConfig, item: &Value) -> Result<Record, PayloadError> {
    normalize_at(config, item, 0)
}

fn normalize_at(config: &DomainConfig, item: &Value, index: usize) -> Result<Record, PayloadError> {
    let Value::Object(object) = item else {
        return Err(PayloadError::NotAnObject { index });
    };

    let id = read_id(config, object).ok_or(PayloadError::MissingId { index })?;
    let category = read_string(object, &config.category_field).unwrap_or_default();

    let mut record = Record::new(id, category);
    record.kind = config
        .kind_field
        .as_deref()
        .and_then(|field| read_string(object, field));
    record.search_fields = config
        .search_fields
        .iter()
        .filter_map(|field| read_string(object, field))
        .collect();
    record.pinned = read_flag(object, config.pinned_field.as_deref());
    record.urgent = read_flag(object, config.urgent_field.as_deref());
    record.timestamp = config
        .timestamp_field
        .as_deref()
        .and_then(|field| object.get(field))
        .and_then(read_timestamp);
    record.payload = item.clone();
    Ok(record)
}

fn read_id(config: &DomainConfig, object: &Map<String, Value>) -> Option<RecordId> {
    config
        .id_fields
        .iter()
        .filter_map(|field| object.get(field))
        .find_map(|value| match value {
            Value::Number(number) => read_numeric_id(number),
            Value::String(text) if !text.trim().is_empty() => Some(RecordId::Text(text.clone())),
            _ => None,
        })
}

/// Integers stay integral; `u64` ids past `i64::MAX` keep their digits as
/// text. Floats count only when they carry no fraction.
fn read_numeric_id(number: &Number) -> Option<RecordId> {
    if let Some(id) = number.as_i64() {
        return Some(RecordId::Int(id));
    }
    if let Some(id) = number.as_u64() {
        return Some(RecordId::Text(id.to_string()));
    }
    number
        .as_f64()
        .filter(|value| {
            value.fract() == 0.0 && *value >= i64::MIN as f64 && *value < i64::MAX as f64
        })
        .map(|value| RecordId::Int(value as i64))
}

fn read_string(object: &Map<String, Value>, field: &str) -> Option<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn read_flag(object: &Map<String, Value>, field: Option<&str>) -> bool {
    match field.and_then(|name| object.get(name)) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn read_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::String(text) => parse_timestamp(text),
        Value::Number(number) => number.as_i64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_record, read_flag};
    use crate::domain::config::DomainConfig;
    use serde_json::json;

    #[test]
    fn flags_accept_bools_and_true_strings_only() {
        let object = json!({"a": true, "b": "TRUE", "c": 1, "d": "yes"});
        let object = object.as_object().unwrap();
        assert!(read_flag(object, Some("a")));
        assert!(read_flag(object, Some("b")));
        assert!(!read_flag(object, Some("c")));
        assert!(!read_flag(object, Some("d")));
        assert!(!read_flag(object, None));
    }

    #[test]
    fn non_string_category_falls_back_to_unrecognized_bucket() {
        let config = DomainConfig::announcements();
        let record = normalize_record(&config, &json!({"id": 1, "category": 42})).unwrap();
        assert_eq!(record.category, "");
        assert!(record.search_fields.is_empty());
        assert_eq!(record.timestamp, None);
    }
}
