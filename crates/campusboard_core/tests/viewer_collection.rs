use campusboard_core::{
    parse_timestamp, CollectionViewer, DomainConfig, FilterState, Record, RecordId,
};
use serde_json::json;

fn announcement(id: i64, category: &str, date: &str, pinned: bool) -> Record {
    let mut record = Record::new(id, category)
        .with_search_field(format!("Announcement {id}"))
        .with_payload(json!({"id": id, "category": category, "date": date}))
        .pinned(pinned);
    record.timestamp = parse_timestamp(date);
    record
}

fn five_announcements() -> Vec<Record> {
    vec![
        announcement(1, "exams", "2024-01-15", true),
        announcement(2, "events", "2024-01-14", true),
        announcement(4, "holidays", "2024-01-13", false),
        announcement(5, "academic", "2024-01-12", false),
        announcement(6, "placements", "2024-01-11", false),
    ]
}

#[test]
fn add_record_prepends_to_working_set() {
    let mut viewer = CollectionViewer::new(DomainConfig::announcements());
    viewer.set_collection(five_announcements());

    viewer.add_record(announcement(3, "exams", "2024-01-16", false));

    assert_eq!(viewer.len(), 6);
    assert_eq!(viewer.records()[0].id, RecordId::Int(3));
    assert_eq!(viewer.records()[1].id, RecordId::Int(1));
}

#[test]
fn view_items_carry_server_payload() {
    let mut viewer = CollectionViewer::new(DomainConfig::announcements());
    viewer.set_collection(five_announcements());

    let snapshot = viewer.view(&FilterState::new().with_category("holidays"));
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].payload["date"], "2024-01-13");
}

#[test]
fn add_record_accepts_unknown_category() {
    let mut viewer = CollectionViewer::new(DomainConfig::announcements());
    viewer.add_record(Record::new(9, "sports"));

    let counts = viewer.category_counts();
    assert_eq!(counts.all(), 1);
    assert!(counts
        .iter()
        .filter(|entry| entry.id != "all")
        .all(|entry| entry.count == 0));
}

#[test]
fn set_collection_replaces_wholesale() {
    let mut viewer = CollectionViewer::new(DomainConfig::announcements());
    viewer.set_collection(five_announcements());
    viewer.set_collection(vec![announcement(7, "exams", "2024-02-01", false)]);

    assert_eq!(viewer.len(), 1);
    assert_eq!(viewer.records()[0].id, RecordId::Int(7));

    viewer.set_collection(Vec::new());
    assert!(viewer.is_empty());
    assert!(viewer.view(&FilterState::default()).items.is_empty());
}

#[test]
fn duplicate_ids_pass_through() {
    let mut viewer = CollectionViewer::new(DomainConfig::announcements());
    viewer.set_collection(vec![
        announcement(1, "exams", "2024-01-15", false),
        announcement(1, "exams", "2024-01-15", false),
    ]);
    assert_eq!(viewer.len(), 2);
    assert_eq!(viewer.category_counts().get("exams"), Some(2));
}

#[test]
fn view_orders_presentation_without_touching_storage() {
    let mut viewer = CollectionViewer::new(DomainConfig::announcements());
    viewer.set_collection(vec![
        announcement(1, "exams", "2024-01-10", false),
        announcement(2, "exams", "2024-01-01", true),
    ]);

    let snapshot = viewer.view(&FilterState::default());
    let order: Vec<RecordId> = snapshot.items.iter().map(|r| r.id.clone()).collect();
    assert_eq!(order, vec![RecordId::Int(2), RecordId::Int(1)]);

    assert_eq!(viewer.records()[0].id, RecordId::Int(1));
}

#[test]
fn view_counts_cover_whole_set_not_filtered_items() {
    let mut viewer = CollectionViewer::new(DomainConfig::announcements());
    viewer.set_collection(five_announcements());

    let snapshot = viewer.view(&FilterState::new().with_category("exams"));
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.category_counts.all(), 5);
    assert_eq!(snapshot.category_counts.get("events"), Some(1));
}

#[test]
fn lost_found_view_keeps_insertion_order() {
    let mut viewer = CollectionViewer::new(DomainConfig::lost_found());
    viewer.set_collection(vec![
        Record::new(1, "books").with_kind("found"),
        Record::new(2, "books").with_kind("lost").with_timestamp(9_000),
        Record::new(3, "books").with_kind("found").with_timestamp(1_000),
    ]);

    let snapshot = viewer.view(&FilterState::new().with_kind("found"));
    let order: Vec<RecordId> = snapshot.items.iter().map(|r| r.id.clone()).collect();
    assert_eq!(order, vec![RecordId::Int(1), RecordId::Int(3)]);
    assert_eq!(snapshot.kind_counts.get("found"), Some(2));
    assert_eq!(snapshot.kind_counts.get("lost"), Some(1));
}
