use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use events_models::{
    Category, CreateEventRequest, Event, EventRow, Status,
};

/// Fixed "today" shared by aggregation tests.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 20).expect("valid date")
}

fn created(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(offset_minutes)
}

/// Minimal event with the fields aggregations look at.
pub fn event(
    id: &str, date: &str, category: Category, status: Status, attendees: u32,
    price: f64,
) -> Event {
    Event::builder()
        .id(id)
        .title(format!("Event {id}"))
        .date(date)
        .category(category)
        .status(status)
        .attendees(attendees)
        .max_attendees(attendees.max(100))
        .price(price)
        .build()
}

/// A small mixed collection around `test_today()`.
pub fn sample_events() -> Vec<Event> {
    vec![
        event("e1", "2024-03-15", Category::Conference, Status::Published, 245, 299.0),
        event("e2", "2024-03-22", Category::Workshop, Status::Published, 89, 149.0),
        event("e3", "2024-03-20", Category::Networking, Status::Published, 120, 0.0),
        event("e4", "2024-04-05", Category::Seminar, Status::Draft, 0, 79.0),
        event("e5", "2024-04-12", Category::Conference, Status::Published, 310, 199.0),
        event("e6", "2024-02-10", Category::Social, Status::Completed, 60, 25.0),
        event("e7", "2024-04-30", Category::Workshop, Status::Cancelled, 12, 49.0),
    ]
}

/// Stored rows for `sample_events()`, oldest first.
pub fn sample_rows() -> Vec<EventRow> {
    sample_events()
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let mut row = EventRow::from(event);
            row.created_at = created(index as i64);
            row.updated_at = row.created_at;
            row
        })
        .collect()
}

pub fn create_request(title: &str, date: &str) -> CreateEventRequest {
    CreateEventRequest::builder()
        .title(title)
        .description("Hands-on session")
        .date(date)
        .time("14:00")
        .location("Downtown Business Center")
        .category(Category::Workshop)
        .max_attendees(150)
        .price(149.0)
        .build()
}
