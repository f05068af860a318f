//! Record source contract and file-backed implementation.
//!
//! # Responsibility
//! - Define the fetch/create seam the service layer talks to.
//! - Provide a JSON-file source for the CLI probe and integration tests.
//!
//! # Invariants
//! - `fetch_all` and `create` return raw response bodies.
//! - A source never mutates the viewer; the service decides what to apply.

use crate::source::draft::RecordDraft;
use crate::source::session::Session;
use log::{error, info};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure reported by a record source.
#[derive(Debug)]
pub enum SourceError {
    Io(std::io::Error),
    /// Source requires credentials the session does not carry.
    Unauthorized,
    /// Source refused the request or holds unusable data.
    Rejected(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Unauthorized => write!(f, "request requires an authenticated session"),
            Self::Rejected(message) => write!(f, "request rejected: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Unauthorized | Self::Rejected(_) => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Fetch/create collaborator for one domain collection endpoint.
pub trait RecordSource {
    /// Returns the full collection body (a JSON array).
    fn fetch_all(&self, session: &Session) -> SourceResult<String>;
    /// Submits a create request and returns the server echo body.
    fn create(&self, session: &Session, draft: &RecordDraft) -> SourceResult<String>;
}

/// Record source backed by a JSON array file.
///
/// Created items get the next integer id and are stored at the front of the
/// array, the same way the portal backends list newest items first.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    envelope: Option<String>,
    require_auth: bool,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            envelope: None,
            require_auth: false,
        }
    }

    /// Wraps create echoes as `{ "<field>": {...} }`.
    pub fn with_envelope(mut self, field: impl Into<String>) -> Self {
        self.envelope = Some(field.into());
        self
    }

    /// Rejects calls from sessions without a token.
    pub fn require_auth(mut self, required: bool) -> Self {
        self.require_auth = required;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_session(&self, session: &Session) -> SourceResult<()> {
        if self.require_auth && !session.is_authenticated() {
            return Err(SourceError::Unauthorized);
        }
        Ok(())
    }

    fn read_items(&self) -> SourceResult<Vec<Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => Err(SourceError::Rejected(format!(
                "`{}` does not hold a json array",
                self.path.display()
            ))),
            Err(err) => Err(SourceError::Rejected(format!(
                "`{}` is not valid json: {err}",
                self.path.display()
            ))),
        }
    }
}

impl RecordSource for JsonFileSource {
    fn fetch_all(&self, session: &Session) -> SourceResult<String> {
        let started_at = Instant::now();
        self.check_session(session)?;
        let body = match std::fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(err) if err.kind() == ErrorKind::NotFound => "[]".to_string(),
            Err(err) => {
                error!(
                    "event=source_fetch module=source status=error duration_ms={} error_code=read_failed",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        info!(
            "event=source_fetch module=source status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(body)
    }

    fn create(&self, session: &Session, draft: &RecordDraft) -> SourceResult<String> {
        let started_at = Instant::now();
        self.check_session(session)?;

        let mut items = self.read_items()?;
        let next_id = items
            .iter()
            .filter_map(|item| item.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| {
                SourceError::Rejected(format!(
                    "`{}` has no integer id left to assign",
                    self.path.display()
                ))
            })?;

        let mut object: Map<String, Value> = draft.fields().clone();
        object.insert("id".to_string(), Value::from(next_id));
        let created = Value::Object(object);
        items.insert(0, created.clone());

        let serialized = serde_json::to_string_pretty(&Value::Array(items))
            .map_err(|err| SourceError::Rejected(format!("failed to encode store: {err}")))?;
        if let Err(err) = std::fs::write(&self.path, serialized) {
            error!(
                "event=source_create module=source status=error duration_ms={} error_code=write_failed",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }

        info!(
            "event=source_create module=source status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );

        let echo = match self.envelope.as_deref() {
            Some(field) => {
                let mut wrapper = Map::new();
                wrapper.insert(field.to_string(), created);
                Value::Object(wrapper)
            }
            None => created,
        };
        Ok(echo.to_string())
    }
}
