use campusboard_core::{
    CollectionService, DomainConfig, FilterState, JsonFileSource, RecordDraft, RecordId,
    RecordSource, RefreshOutcome, RefreshTrigger, Session, SourceError, SourceResult,
    SubmitError,
};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Source replaying canned responses and recording seen auth headers.
#[derive(Default)]
struct ScriptedSource {
    fetches: RefCell<VecDeque<SourceResult<String>>>,
    creates: RefCell<VecDeque<SourceResult<String>>>,
    seen_headers: RefCell<Vec<Option<String>>>,
}

impl ScriptedSource {
    fn with_fetch(self, result: SourceResult<String>) -> Self {
        self.fetches.borrow_mut().push_back(result);
        self
    }

    fn with_create(self, result: SourceResult<String>) -> Self {
        self.creates.borrow_mut().push_back(result);
        self
    }
}

impl RecordSource for ScriptedSource {
    fn fetch_all(&self, session: &Session) -> SourceResult<String> {
        self.seen_headers
            .borrow_mut()
            .push(session.authorization_header());
        self.fetches
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("[]".to_string()))
    }

    fn create(&self, session: &Session, _draft: &RecordDraft) -> SourceResult<String> {
        self.seen_headers
            .borrow_mut()
            .push(session.authorization_header());
        self.creates
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Rejected("no scripted create".to_string())))
    }
}

const TWO_ANNOUNCEMENTS: &str = r#"[
    {"id": 1, "title": "Exam schedule", "content": "Out now", "category": "exams", "date": "2024-01-15", "pinned": true},
    {"id": 2, "title": "Tech fest", "content": "Register", "category": "events", "date": "2024-01-16", "pinned": false}
]"#;

fn announcement_draft() -> RecordDraft {
    RecordDraft::new()
        .set("title", "Library hours")
        .set("content", "Open late during exams")
        .set("category", "academic")
        .set("date", "2024-01-20")
}

#[test]
fn initial_refresh_applies_collection_and_sends_bearer_token() {
    let source = ScriptedSource::default().with_fetch(Ok(TWO_ANNOUNCEMENTS.to_string()));
    let mut service = CollectionService::new(
        source,
        Session::with_token("tok-123"),
        DomainConfig::announcements(),
    );

    let outcome = service.refresh(RefreshTrigger::InitialMount);
    assert_eq!(outcome, RefreshOutcome::Applied { records: 2 });
    assert_eq!(service.viewer().len(), 2);
    assert_eq!(
        service.source().seen_headers.borrow().as_slice(),
        &[Some("Bearer tok-123".to_string())]
    );
}

#[test]
fn failed_fetch_keeps_previous_working_set() {
    let source = ScriptedSource::default()
        .with_fetch(Ok(TWO_ANNOUNCEMENTS.to_string()))
        .with_fetch(Err(SourceError::Unauthorized))
        .with_fetch(Ok(r#"{"error": "boom"}"#.to_string()));
    let mut service =
        CollectionService::new(source, Session::anonymous(), DomainConfig::announcements());

    service.refresh(RefreshTrigger::InitialMount);
    assert_eq!(
        service.refresh(RefreshTrigger::UserRefresh),
        RefreshOutcome::Failed
    );
    assert_eq!(
        service.refresh(RefreshTrigger::UserRefresh),
        RefreshOutcome::Failed
    );
    assert_eq!(service.viewer().len(), 2);
}

#[test]
fn stale_refresh_result_is_discarded() {
    let mut service = CollectionService::new(
        ScriptedSource::default(),
        Session::anonymous(),
        DomainConfig::announcements(),
    );

    let older = service.begin_refresh(RefreshTrigger::InitialMount);
    let newer = service.begin_refresh(RefreshTrigger::UserRefresh);

    let applied = service.complete_refresh(newer, Ok(r#"[{"id": 9}]"#.to_string()));
    assert_eq!(applied, RefreshOutcome::Applied { records: 1 });

    let stale = service.complete_refresh(older, Ok(TWO_ANNOUNCEMENTS.to_string()));
    assert_eq!(stale, RefreshOutcome::Stale);
    assert_eq!(service.viewer().records()[0].id, RecordId::Int(9));
}

#[test]
fn submit_prepends_server_echo() {
    let echo = r#"{"id": 3, "title": "Library hours", "content": "Open late", "category": "academic", "date": "2024-01-20"}"#;
    let source = ScriptedSource::default()
        .with_fetch(Ok(TWO_ANNOUNCEMENTS.to_string()))
        .with_create(Ok(echo.to_string()));
    let mut service =
        CollectionService::new(source, Session::anonymous(), DomainConfig::announcements());
    service.refresh(RefreshTrigger::InitialMount);

    let id = service.submit(&announcement_draft()).unwrap();
    assert_eq!(id, RecordId::Int(3));
    assert_eq!(service.viewer().len(), 3);
    assert_eq!(service.viewer().records()[0].id, RecordId::Int(3));

    let snapshot = service.view(&FilterState::new().with_category("academic"));
    assert_eq!(snapshot.items.len(), 1);
}

#[test]
fn submit_failures_leave_working_set_untouched() {
    let source = ScriptedSource::default()
        .with_fetch(Ok(TWO_ANNOUNCEMENTS.to_string()))
        .with_create(Err(SourceError::Rejected("500".to_string())))
        .with_create(Ok(r#"{"title": "no id"}"#.to_string()));
    let mut service =
        CollectionService::new(source, Session::anonymous(), DomainConfig::announcements());
    service.refresh(RefreshTrigger::InitialMount);

    let draft_err = service
        .submit(&RecordDraft::new().set("title", "Only title"))
        .unwrap_err();
    assert!(matches!(draft_err, SubmitError::Draft(_)));

    let source_err = service.submit(&announcement_draft()).unwrap_err();
    assert!(matches!(source_err, SubmitError::Source(_)));

    let payload_err = service.submit(&announcement_draft()).unwrap_err();
    assert!(matches!(payload_err, SubmitError::Payload(_)));

    assert_eq!(service.viewer().len(), 2);
}

#[test]
fn json_file_source_round_trips_create_and_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lostfound.json");
    std::fs::write(
        &path,
        r#"[{"id": 4, "title": "Keys", "description": "Car keys", "location": "Gym", "category": "personal", "type": "lost"}]"#,
    )
    .unwrap();

    let source = JsonFileSource::new(&path).require_auth(true);
    let mut service =
        CollectionService::new(source, Session::with_token("tok"), DomainConfig::lost_found());
    assert_eq!(
        service.refresh(RefreshTrigger::InitialMount),
        RefreshOutcome::Applied { records: 1 }
    );

    let draft = RecordDraft::new()
        .set("title", "Calculator")
        .set("description", "Casio fx")
        .set("location", "Room 101")
        .set("date", "2024-01-09")
        .set("contact", "me@campus.edu")
        .set("category", "electronics")
        .set("type", "found");
    let id = service.submit(&draft).unwrap();
    assert_eq!(id, RecordId::Int(5));

    assert_eq!(
        service.refresh(RefreshTrigger::CreateAcknowledged),
        RefreshOutcome::Applied { records: 2 }
    );
    assert_eq!(service.viewer().records()[0].id, RecordId::Int(5));
    assert_eq!(service.viewer().kind_counts().get("found"), Some(1));
}

#[test]
fn json_file_source_rejects_create_when_ids_are_exhausted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("full.json");
    let stored = format!(r#"[{{"id": {}, "title": "Last"}}]"#, i64::MAX);
    std::fs::write(&path, &stored).unwrap();

    let source = JsonFileSource::new(&path);
    let draft = RecordDraft::new().set("title", "One more");
    let err = source.create(&Session::anonymous(), &draft).unwrap_err();
    assert!(matches!(err, SourceError::Rejected(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), stored);
}

#[test]
fn json_file_source_rejects_anonymous_session_when_auth_required() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileSource::new(dir.path().join("missing.json")).require_auth(true);
    assert!(matches!(
        source.fetch_all(&Session::anonymous()).unwrap_err(),
        SourceError::Unauthorized
    ));
    assert_eq!(source.fetch_all(&Session::with_token("t")).unwrap(), "[]");
}

#[test]
fn json_file_source_wraps_echo_in_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileSource::new(dir.path().join("news.json")).with_envelope("news");
    let mut service =
        CollectionService::new(source, Session::anonymous(), DomainConfig::tech_news());

    let draft = RecordDraft::new()
        .set("title", "Rust 2024 edition")
        .set("description", "Stabilized")
        .set("author", "Jane");
    assert_eq!(service.submit(&draft).unwrap(), RecordId::Int(1));
    assert_eq!(service.viewer().len(), 1);
}
