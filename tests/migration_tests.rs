use rfootfall::core::flush::FlushSettings;
use rfootfall::core::session::TallySession;
use rfootfall::core::store::EventStore;
use rfootfall::db::migrate::{footfall_has_day_column, log_table_exists};
use rfootfall::db::queries::DaySource;
use rfootfall::db::store::SqliteStore;
use rfootfall::models::event::Event;
use rfootfall::models::event_kind::EventKind;
use std::num::NonZeroU32;

mod common;
use common::{create_legacy_store, day, setup_test_db};

fn index_names(store: &SqliteStore) -> Vec<String> {
    let mut stmt = store
        .pool()
        .conn
        .prepare("SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='footfall' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect()
}

#[test]
fn test_ensure_schema_on_cold_store_is_idempotent() {
    let db_path = setup_test_db("schema_cold");
    let mut store = SqliteStore::open(&db_path).unwrap();

    store.ensure_schema().unwrap();
    store.ensure_schema().unwrap();

    assert!(footfall_has_day_column(&store.pool().conn).unwrap());
    assert_eq!(store.day_source(), DaySource::DayColumn);
    assert_eq!(
        index_names(&store),
        vec!["idx_footfall_day".to_string(), "idx_footfall_day_kind".to_string()]
    );
    assert_eq!(store.sum_for_day(day(2025, 9, 1)).unwrap(), (0, 0));
}

#[test]
fn test_legacy_store_falls_back_to_created_at_until_migrated() {
    let db_path = setup_test_db("schema_fallback");
    create_legacy_store(&db_path);

    let store = SqliteStore::open(&db_path).unwrap();
    assert_eq!(store.day_source(), DaySource::CreatedAt);
    assert_eq!(store.sum_for_day(day(2025, 8, 30)).unwrap(), (1, 1));
    assert_eq!(store.sum_for_day(day(2025, 8, 31)).unwrap(), (2, 0));
}

#[test]
fn test_legacy_store_gets_day_column_backfilled() {
    let db_path = setup_test_db("schema_migrate");
    create_legacy_store(&db_path);

    let mut store = SqliteStore::open_ready(&db_path).unwrap();
    assert_eq!(store.day_source(), DaySource::DayColumn);
    assert!(footfall_has_day_column(&store.pool().conn).unwrap());

    // Existing rows stay queryable through the day column.
    assert_eq!(store.sum_for_day(day(2025, 8, 30)).unwrap(), (1, 1));
    assert_eq!(store.sum_for_day(day(2025, 8, 31)).unwrap(), (2, 0));

    // Migration is recorded once, however many times setup runs.
    store.ensure_schema().unwrap();
    let applied: i64 = store
        .pool()
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(applied, 1);
    assert_eq!(index_names(&store).len(), 2);
}

#[test]
fn test_new_events_use_selected_day_after_migration() {
    let db_path = setup_test_db("schema_new_events");
    create_legacy_store(&db_path);

    let store = SqliteStore::open_ready(&db_path).unwrap();
    let mut session = TallySession::new(store, FlushSettings::default());

    // A past day, unrelated to the insertion time.
    let d = day(2025, 8, 30);
    session.enqueue(EventKind::Total, d, NonZeroU32::MIN);
    session.sync(true).unwrap();

    assert_eq!(session.store().sum_for_day(d).unwrap(), (2, 1));

    let events = session.store().events_for_day(d).unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.windows(2).all(|w| w[0].id < w[1].id));

    // Most recent for the day is the new row, not the backfilled ones.
    let mut store = session.into_store();
    assert!(store.delete_most_recent(d).unwrap());
    assert_eq!(store.sum_for_day(d).unwrap(), (1, 1));
}

#[test]
fn test_fallback_path_append_and_delete() {
    let db_path = setup_test_db("schema_fallback_writes");
    create_legacy_store(&db_path);

    let mut store = SqliteStore::open(&db_path).unwrap();
    let d = day(2025, 9, 2);

    store
        .append_batch(&[Event::new(
            EventKind::Operational,
            d,
            NonZeroU32::MIN,
        )])
        .unwrap();
    assert_eq!(store.sum_for_day(d).unwrap(), (0, 1));

    assert!(store.delete_most_recent(d).unwrap());
    assert!(!store.delete_most_recent(d).unwrap());
    assert_eq!(store.sum_for_day(day(2025, 8, 30)).unwrap(), (1, 1));
}

#[test]
fn test_delete_most_recent_is_per_day() {
    let db_path = setup_test_db("schema_delete_per_day");
    let mut store = SqliteStore::open_ready(&db_path).unwrap();
    let d1 = day(2025, 9, 1);
    let d2 = day(2025, 9, 2);

    store
        .append_batch(&[
            Event::new(EventKind::Total, d1, NonZeroU32::MIN),
            Event::new(EventKind::Operational, d1, NonZeroU32::MIN),
            Event::new(EventKind::Total, d2, NonZeroU32::MIN),
        ])
        .unwrap();

    assert!(store.delete_most_recent(d1).unwrap());
    assert_eq!(store.sum_for_day(d1).unwrap(), (1, 0));
    assert_eq!(store.sum_for_day(d2).unwrap(), (1, 0));

    store.append_batch(&[]).unwrap();
    assert_eq!(common::row_count(&store), 2);
}

#[test]
fn test_unmigrated_store_writes_without_audit_log() {
    let db_path = setup_test_db("schema_no_log_table");
    create_legacy_store(&db_path);

    let mut store = SqliteStore::open(&db_path).unwrap();
    assert!(!store.has_audit_log());

    let d = day(2025, 9, 3);
    store
        .append_batch(&[Event::new(EventKind::Total, d, NonZeroU32::MIN)])
        .unwrap();
    assert!(store.delete_most_recent(d).unwrap());

    // Plain open never creates tables.
    assert!(!log_table_exists(&store.pool().conn).unwrap());

    store.ensure_schema().unwrap();
    assert!(store.has_audit_log());

    store
        .append_batch(&[Event::new(EventKind::Total, d, NonZeroU32::MIN)])
        .unwrap();
    let flushes: i64 = store
        .pool()
        .conn
        .query_row("SELECT COUNT(*) FROM log WHERE operation = 'flush'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(flushes, 1);
}
