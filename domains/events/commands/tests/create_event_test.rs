use std::sync::Arc;

use events_commands::{CreateEventError, CreateEventHandler};
use events_dao::{EventTable, MemoryEventTable};
use events_models::{DEFAULT_ORGANIZER, Status, ValidationError};
use test_utils::{FlakyEventTable, TableOp, create_request};

#[tokio::test]
async fn test_create_event_success() {
    let table = Arc::new(MemoryEventTable::new());
    let handler = CreateEventHandler::new(table.clone());

    let event = handler
        .execute(create_request("Digital Marketing Workshop", "2024-03-22"))
        .await
        .unwrap();

    assert_eq!(event.status, Status::Draft);
    assert_eq!(event.attendees, 0);
    assert_eq!(event.organizer, DEFAULT_ORGANIZER);
    assert_eq!(event.price, 149.0);
    assert_eq!(table.select_all().await.unwrap()[0].id, event.id);
}

#[tokio::test]
async fn test_invalid_request_never_reaches_table() {
    let table = Arc::new(FlakyEventTable::default());
    let handler = CreateEventHandler::new(table.clone());

    let result = handler.execute(create_request("", "2024-03-22")).await;

    assert!(matches!(
        result,
        Err(CreateEventError::Validation(
            ValidationError::RequiredFieldMissing("title")
        ))
    ));
    assert_eq!(table.calls(), 0);
}

#[tokio::test]
async fn test_table_failure_is_reported() {
    let table = Arc::new(FlakyEventTable::default());
    table.fail(TableOp::Insert, "duplicate key value");
    let handler = CreateEventHandler::new(table);

    let result = handler.execute(create_request("Meetup", "2024-04-01")).await;

    let err = result.unwrap_err();
    assert!(matches!(err, CreateEventError::Table(_)));
    assert!(err.to_string().contains("duplicate key value"));
}
