use std::{sync::Arc, time::Duration};

use events_dao::{EventTable, MemoryEventTable};
use events_errors::{DELETE_FALLBACK, EventError};
use events_models::{
    Category, DEFAULT_ORGANIZER, MAX_CAPACITY, Status, UpdateEventRequest,
};
use events_store::EventStore;
use test_utils::{FlakyEventTable, TableOp, create_request, sample_rows};

async fn loaded_store() -> (Arc<FlakyEventTable>, EventStore) {
    let table = Arc::new(FlakyEventTable::new(sample_rows()));
    let store = EventStore::new(table.clone());
    store.refetch().await.unwrap();
    (table, store)
}

#[tokio::test]
async fn test_refetch_loads_newest_first() {
    let (_table, store) = loaded_store().await;

    let events = store.events().await;

    assert_eq!(events.len(), 7);
    assert_eq!(events[0].id, "e7");
    assert!(!store.is_loading().await);
    assert!(store.error().await.is_none());
}

#[tokio::test]
async fn test_create_round_trip_prepends() {
    let store = EventStore::new(Arc::new(MemoryEventTable::new()));
    let mut request = create_request("Digital Marketing Workshop", "2024-03-22");
    request.image = Some("https://example.com/workshop.png".to_string());

    let created = store.create(request.clone()).await.unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.status, Status::Draft);
    assert_eq!(created.attendees, 0);
    assert_eq!(created.organizer, DEFAULT_ORGANIZER);

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    let stored = &listed[0];
    assert_eq!(stored.id, created.id);
    assert_eq!(stored.title, request.title);
    assert_eq!(stored.description, request.description);
    assert_eq!(stored.date, request.date);
    assert_eq!(stored.time, request.time);
    assert_eq!(stored.location, request.location);
    assert_eq!(stored.category, request.category);
    assert_eq!(stored.max_attendees, request.max_attendees);
    assert_eq!(Some(stored.price), request.price);
    assert_eq!(stored.image, request.image);

    let second = store
        .create(create_request("Rust Meetup", "2024-04-02"))
        .await
        .unwrap();
    let cached = store.events().await;
    assert_eq!(cached[0].id, second.id);
    assert_eq!(cached[1].id, created.id);
}

#[tokio::test]
async fn test_capacity_beyond_column_range_is_rejected() {
    let store = EventStore::new(Arc::new(MemoryEventTable::new()));

    let mut largest = create_request("Stadium Tour", "2024-07-01");
    largest.max_attendees = MAX_CAPACITY;
    let created = store.create(largest).await.unwrap();
    assert_eq!(store.list().await.unwrap()[0].max_attendees, MAX_CAPACITY);

    let mut oversized = create_request("Oversized", "2024-07-02");
    oversized.max_attendees = 3_000_000_000;
    let err = store.create(oversized).await.unwrap_err();
    assert!(matches!(err, EventError::Create { .. }));

    let err = store
        .update(
            &created.id,
            UpdateEventRequest::builder()
                .max_attendees(MAX_CAPACITY + 1)
                .build(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EventError::Update { .. }));

    let cached = store.events().await;
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].max_attendees, MAX_CAPACITY);
}

#[tokio::test]
async fn test_double_delete_fails_and_keeps_cache() {
    let (_table, store) = loaded_store().await;

    store.delete("e3").await.unwrap();
    let before = store.events().await;
    let second = store.delete("e3").await;

    assert!(matches!(second, Err(EventError::Delete { .. })));
    assert_eq!(store.events().await, before);
    assert_eq!(before.len(), 6);
    assert!(store.error().await.is_some());
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let (_table, store) = loaded_store().await;
    let position = store
        .events()
        .await
        .iter()
        .position(|event| event.id == "e2")
        .unwrap();

    let updated = store
        .update(
            "e2",
            UpdateEventRequest::builder()
                .category(Category::Seminar)
                .build(),
        )
        .await
        .unwrap();

    let events = store.events().await;
    assert_eq!(updated.category, Category::Seminar);
    assert_eq!(events[position].id, "e2");
    assert_eq!(events[position].category, Category::Seminar);
    assert_eq!(
        events
            .iter()
            .filter(|event| event.category == Category::Workshop)
            .count(),
        1
    );
}

#[tokio::test]
async fn test_failed_writes_leave_cache_unchanged() {
    let (table, store) = loaded_store().await;
    let before = store.events().await;

    table.fail(TableOp::Insert, "connection reset");
    table.fail(TableOp::Update, "connection reset");
    table.fail(TableOp::Delete, "");

    let created = store.create(create_request("Meetup", "2024-04-01")).await;
    let updated = store
        .update("e1", UpdateEventRequest::builder().title("Renamed").build())
        .await;
    let deleted = store.delete("e1").await;

    assert_eq!(
        created.unwrap_err(),
        EventError::Create {
            message: "connection reset".to_string()
        }
    );
    assert!(matches!(updated, Err(EventError::Update { .. })));
    assert_eq!(deleted.unwrap_err().message(), DELETE_FALLBACK);
    assert_eq!(store.events().await, before);
}

#[tokio::test]
async fn test_failed_fetch_is_retryable() {
    let (table, store) = loaded_store().await;
    let before = store.events().await;
    table.fail(TableOp::Select, "timeout");

    let err = store.refetch().await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.message(), "timeout");
    assert_eq!(store.error().await, Some(err));
    assert_eq!(store.events().await, before);

    table.recover();
    store.refetch().await.unwrap();
    assert!(store.error().await.is_none());
}

#[tokio::test]
async fn test_unknown_category_surfaces_as_fetch_error() {
    let mut rows = sample_rows();
    rows[0].category = "webinar".to_string();
    let store = EventStore::new(Arc::new(MemoryEventTable::with_rows(rows)));

    let err = store.refetch().await.unwrap_err();

    assert!(matches!(err, EventError::Fetch { .. }));
    assert!(err.message().contains("webinar"));
    assert!(store.events().await.is_empty());
}

#[tokio::test]
async fn test_concurrent_operations_are_serialized() {
    let table = Arc::new(
        FlakyEventTable::new(sample_rows())
            .with_latency(Duration::from_millis(10)),
    );
    let store = Arc::new(EventStore::new(table.clone()));
    store.refetch().await.unwrap();

    let mut handles = Vec::new();
    for i in 0..5 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create(create_request(&format!("Concurrent {i}"), "2024-05-01"))
                .await
        }));
    }
    let deleting = {
        let store = store.clone();
        tokio::spawn(async move { store.delete("e1").await })
    };
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    deleting.await.unwrap().unwrap();

    assert_eq!(table.max_in_flight(), 1);

    let cached = store.events().await;
    let remote = table.select_all().await.unwrap();
    assert_eq!(cached.len(), 11);
    assert_eq!(
        cached.iter().map(|event| event.id.as_str()).collect::<Vec<_>>(),
        remote.iter().map(|row| row.id.as_str()).collect::<Vec<_>>()
    );
}
