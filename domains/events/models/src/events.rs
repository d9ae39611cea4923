use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::enums::{Category, Status};

/// Organizer recorded when a create request leaves it blank.
pub const DEFAULT_ORGANIZER: &str = "Current User";

/// Largest capacity the `max_attendees` column can hold.
pub const MAX_CAPACITY: u32 = i32::MAX as u32;

/// Stored layout of `Event::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An event as held by the dashboard. Field names serialize in camelCase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    pub description: String,
    #[builder(setter(into))]
    pub date: String,
    #[builder(default, setter(into))]
    pub time: String,
    #[builder(default, setter(into))]
    pub location: String,
    #[builder(default)]
    pub category: Category,
    #[builder(default)]
    pub status: Status,
    #[builder(default)]
    pub attendees: u32,
    #[builder(default = 100)]
    pub max_attendees: u32,
    #[builder(default)]
    pub price: f64,
    #[builder(default, setter(strip_option, into))]
    pub image: Option<String>,
    #[builder(default = DEFAULT_ORGANIZER.to_string(), setter(into))]
    pub organizer: String,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Revenue attributable to this event. Never stored.
    pub fn revenue(&self) -> f64 { self.price * f64::from(self.attendees) }

    /// The stored date as a calendar date, or `None` when the stored string
    /// is not `YYYY-MM-DD`.
    pub fn date_value(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Naive calendar-date comparison: today counts as upcoming.
    pub fn is_on_or_after(&self, today: NaiveDate) -> bool {
        self.date_value().is_some_and(|date| date >= today)
    }

    pub fn capacity_label(&self) -> String {
        format!("{} / {}", self.attendees, self.max_attendees)
    }

    /// Fraction of capacity taken, `0.0` when capacity is zero.
    pub fn fill_ratio(&self) -> f64 {
        if self.max_attendees == 0 {
            return 0.0;
        }
        f64::from(self.attendees) / f64::from(self.max_attendees)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowDecodeError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("column {column} must not be negative, got {value}")]
    NegativeCount { column: &'static str, value: i64 },
}

/// Row shape of the `events` table. Columns are snake_case and enums travel
/// as plain strings until decoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: String,
    pub status: String,
    pub attendees: i32,
    pub max_attendees: i32,
    pub price: f64,
    pub image: Option<String>,
    pub organizer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = RowDecodeError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category: row.category.parse()?,
            status: row.status.parse()?,
            attendees: non_negative("attendees", row.attendees)?,
            max_attendees: non_negative("max_attendees", row.max_attendees)?,
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            time: row.time,
            location: row.location,
            price: row.price,
            image: row.image,
            organizer: row.organizer,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            category: event.category.as_str().to_string(),
            status: event.status.as_str().to_string(),
            attendees: count_column(event.attendees),
            max_attendees: count_column(event.max_attendees),
            price: event.price,
            image: event.image.clone(),
            organizer: event.organizer.clone(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

fn non_negative(column: &'static str, value: i32) -> Result<u32, RowDecodeError> {
    u32::try_from(value).map_err(|_| RowDecodeError::NegativeCount {
        column,
        value: i64::from(value),
    })
}

/// Column value for a count. Validated capacities and decoded counts always
/// fit; anything else saturates.
pub fn count_column(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> EventRow {
        EventRow {
            id: "evt-1".to_string(),
            title: "Tech Innovation Summit".to_string(),
            description: "Talks".to_string(),
            date: "2024-03-15".to_string(),
            time: "09:00".to_string(),
            location: "San Francisco".to_string(),
            category: "conference".to_string(),
            status: "published".to_string(),
            attendees: 245,
            max_attendees: 500,
            price: 299.0,
            image: None,
            organizer: "TechCorp Events".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_decodes_into_event() {
        let event = Event::try_from(row()).unwrap();

        assert_eq!(event.category, Category::Conference);
        assert_eq!(event.status, Status::Published);
        assert_eq!(event.max_attendees, 500);
        assert_eq!(event.revenue(), 245.0 * 299.0);
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let mut row = row();
        row.status = "archived".to_string();

        let result = Event::try_from(row);

        assert_eq!(
            result,
            Err(RowDecodeError::UnknownStatus("archived".to_string()))
        );
    }

    #[test]
    fn test_row_with_negative_attendees_is_rejected() {
        let mut row = row();
        row.attendees = -1;

        assert!(matches!(
            Event::try_from(row),
            Err(RowDecodeError::NegativeCount {
                column: "attendees",
                ..
            })
        ));
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let event = Event::try_from(row()).unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["maxAttendees"], 500);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("max_attendees").is_none());
    }

    #[test]
    fn test_date_comparison_is_inclusive_of_today() {
        let event = Event::builder()
            .id("a")
            .title("Today")
            .date("2024-05-01")
            .build();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(event.is_on_or_after(today));
        assert!(!event.is_on_or_after(today.succ_opt().unwrap()));
    }

    #[test]
    fn test_malformed_date_is_never_upcoming() {
        let event = Event::builder()
            .id("a")
            .title("Someday")
            .date("next week")
            .build();
        let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

        assert!(event.date_value().is_none());
        assert!(!event.is_on_or_after(today));
    }

    #[test]
    fn test_fill_ratio_guards_zero_capacity() {
        let event = Event::builder()
            .id("a")
            .title("Empty room")
            .date("2024-05-01")
            .attendees(3)
            .max_attendees(0)
            .build();

        assert_eq!(event.fill_ratio(), 0.0);
        assert_eq!(event.capacity_label(), "3 / 0");
    }
}
