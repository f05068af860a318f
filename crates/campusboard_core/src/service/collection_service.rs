//! Collection refresh and create orchestration.
//!
//! # Responsibility
//! - Refresh the working set only on explicit triggers.
//! - Discard fetch results superseded by a newer refresh.
//! - Apply server-confirmed creates to the front of the working set.
//!
//! # Invariants
//! - Fetch and decode failures are logged and swallowed; the working set is
//!   left untouched.
//! - No optimistic inserts: a record is added only after the source echoes it.

use crate::domain::config::DomainConfig;
use crate::ingest::payload::{decode_collection, decode_created, PayloadError};
use crate::model::record::RecordId;
use crate::source::draft::{DraftError, RecordDraft};
use crate::source::record_source::{RecordSource, SourceError, SourceResult};
use crate::source::session::Session;
use crate::view::filter::FilterState;
use crate::view::viewer::{CollectionViewer, ViewSnapshot};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Discrete event that asks for a fresh collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// View was opened.
    InitialMount,
    /// User pressed refresh.
    UserRefresh,
    /// A create/update was acknowledged by the source.
    CreateAcknowledged,
}

impl RefreshTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialMount => "initial_mount",
            Self::UserRefresh => "user_refresh",
            Self::CreateAcknowledged => "create_acknowledged",
        }
    }
}

/// Handle for one in-flight refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    trigger: RefreshTrigger,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger
    }
}

/// Issues refresh tickets and tells whether a ticket is still the latest.
#[derive(Debug, Default)]
pub struct RefreshTracker {
    latest: u64,
}

impl RefreshTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes every earlier one.
    pub fn issue(&mut self, trigger: RefreshTrigger) -> RefreshTicket {
        self.latest += 1;
        RefreshTicket {
            generation: self.latest,
            trigger,
        }
    }

    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.generation == self.latest
    }
}

/// Result of completing one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Working set replaced with `records` items.
    Applied { records: usize },
    /// A newer refresh was issued; result dropped.
    Stale,
    /// Source or payload failure; working set kept.
    Failed,
}

/// Error returned to the create-form collaborator.
#[derive(Debug)]
pub enum SubmitError {
    Draft(DraftError),
    Source(SourceError),
    Payload(PayloadError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Draft(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Payload(err) => Some(err),
        }
    }
}

impl From<DraftError> for SubmitError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

impl From<SourceError> for SubmitError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<PayloadError> for SubmitError {
    fn from(value: PayloadError) -> Self {
        Self::Payload(value)
    }
}

/// Service facade binding one source, one session and one viewer.
pub struct CollectionService<S: RecordSource> {
    source: S,
    session: Session,
    viewer: CollectionViewer,
    tracker: RefreshTracker,
}

impl<S: RecordSource> CollectionService<S> {
    /// Creates a service with an empty working set.
    pub fn new(source: S, session: Session, config: DomainConfig) -> Self {
        Self {
            source,
            session,
            viewer: CollectionViewer::new(config),
            tracker: RefreshTracker::new(),
        }
    }

    pub fn viewer(&self) -> &CollectionViewer {
        &self.viewer
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Swaps credentials, e.g. after login. Does not refresh.
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    /// Starts a refresh; any earlier in-flight ticket becomes stale.
    pub fn begin_refresh(&mut self, trigger: RefreshTrigger) -> RefreshTicket {
        let ticket = self.tracker.issue(trigger);
        info!(
            "event=collection_refresh module=service status=start domain={} trigger={} generation={}",
            self.viewer.config().name,
            trigger.as_str(),
            ticket.generation
        );
        ticket
    }

    /// Applies a fetch result if `ticket` is still the latest refresh.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: SourceResult<String>,
    ) -> RefreshOutcome {
        let domain = self.viewer.config().name.clone();
        if !self.tracker.is_current(&ticket) {
            debug!(
                "event=collection_refresh module=service status=stale domain={} trigger={} generation={}",
                domain,
                ticket.trigger.as_str(),
                ticket.generation
            );
            return RefreshOutcome::Stale;
        }

        let body = match result {
            Ok(body) => body,
            Err(err) => {
                error!(
                    "event=collection_refresh module=service status=error domain={} trigger={} error_code=fetch_failed error={}",
                    domain,
                    ticket.trigger.as_str(),
                    err
                );
                return RefreshOutcome::Failed;
            }
        };

        match decode_collection(self.viewer.config(), &body) {
            Ok(records) => {
                let count = records.len();
                self.viewer.set_collection(records);
                info!(
                    "event=collection_refresh module=service status=ok domain={} trigger={} count={}",
                    domain,
                    ticket.trigger.as_str(),
                    count
                );
                RefreshOutcome::Applied { records: count }
            }
            Err(err) => {
                error!(
                    "event=collection_refresh module=service status=error domain={} trigger={} error_code=payload_invalid error={}",
                    domain,
                    ticket.trigger.as_str(),
                    err
                );
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetches and applies a fresh collection synchronously.
    pub fn refresh(&mut self, trigger: RefreshTrigger) -> RefreshOutcome {
        let started_at = Instant::now();
        let ticket = self.begin_refresh(trigger);
        let result = self.source.fetch_all(&self.session);
        let outcome = self.complete_refresh(ticket, result);
        debug!(
            "event=collection_refresh module=service status=done duration_ms={}",
            started_at.elapsed().as_millis()
        );
        outcome
    }

    /// Validates and submits a draft, then prepends the server echo.
    ///
    /// # Errors
    /// - `SubmitError::Draft` when a required field is missing or blank.
    /// - `SubmitError::Source` when the source rejects the request.
    /// - `SubmitError::Payload` when the echo cannot be decoded.
    ///
    /// The working set is unchanged on every error path.
    pub fn submit(&mut self, draft: &RecordDraft) -> Result<RecordId, SubmitError> {
        let domain = self.viewer.config().name.clone();
        if let Err(err) = draft.validate(self.viewer.config()) {
            warn!(
                "event=record_submit module=service status=rejected domain={} error_code=draft_invalid error={}",
                domain, err
            );
            return Err(err.into());
        }

        let body = self.source.create(&self.session, draft).map_err(|err| {
            error!(
                "event=record_submit module=service status=error domain={} error_code=create_failed error={}",
                domain, err
            );
            SubmitError::from(err)
        })?;

        let record = decode_created(self.viewer.config(), &body).map_err(|err| {
            error!(
                "event=record_submit module=service status=error domain={} error_code=echo_invalid error={}",
                domain, err
            );
            SubmitError::from(err)
        })?;

        let id = record.id.clone();
        self.viewer.add_record(record);
        info!(
            "event=record_submit module=service status=ok domain={} id={}",
            domain, id
        );
        Ok(id)
    }

    pub fn view(&self, state: &FilterState) -> ViewSnapshot<'_> {
        self.viewer.view(state)
    }
}
