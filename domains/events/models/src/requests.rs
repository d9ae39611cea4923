use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::{
    enums::{Category, Status},
    events::{DATE_FORMAT, DEFAULT_ORGANIZER, EventRow, MAX_CAPACITY, count_column},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    RequiredFieldMissing(&'static str),
    #[error("date must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
    #[error("maximum attendees must be between 1 and 2147483647")]
    InvalidCapacity,
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("image must be an http(s) URL, got {0:?}")]
    InvalidUrl(String),
    #[error("update contains no fields")]
    EmptyUpdate,
}

/// Fields a user submits to create an event. `id`, timestamps, status and
/// attendee count are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
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
    pub max_attendees: u32,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub price: Option<f64>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub image: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub organizer: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing("title"));
        }
        validate_date(&self.date)?;
        validate_capacity(self.max_attendees)?;
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(ref image) = self.image {
            validate_url(image)?;
        }
        Ok(())
    }

    /// Insert payload with the creation defaults applied.
    pub fn into_new_event(self) -> NewEvent {
        NewEvent {
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            category: self.category,
            status: Status::Draft,
            max_attendees: self.max_attendees,
            price: self.price.unwrap_or(0.0),
            image: self.image,
            organizer: self
                .organizer
                .filter(|organizer| !organizer.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ORGANIZER.to_string()),
        }
    }
}

/// Insert-one payload for the events table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: Category,
    pub status: Status,
    pub max_attendees: u32,
    pub price: f64,
    pub image: Option<String>,
    pub organizer: String,
}

impl NewEvent {
    /// Row as first stored: no attendees yet, both timestamps at `now`.
    pub fn into_row(self, id: String, now: DateTime<Utc>) -> EventRow {
        EventRow {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            category: self.category.as_str().to_string(),
            status: self.status.as_str().to_string(),
            attendees: 0,
            max_attendees: count_column(self.max_attendees),
            price: self.price,
            image: self.image,
            organizer: self.organizer,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Absent fields are left untouched by the table; attendee
/// count and organizer are not updatable here.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder,
)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub title: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub description: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub date: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub time: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub location: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub category: Option<Category>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub price: Option<f64>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub image: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub status: Option<Status>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool { self == &Self::default() }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::RequiredFieldMissing("title"));
            }
        }
        if let Some(ref date) = self.date {
            validate_date(date)?;
        }
        if let Some(max_attendees) = self.max_attendees {
            validate_capacity(max_attendees)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(ref image) = self.image {
            validate_url(image)?;
        }
        Ok(())
    }
}

impl UpdateEventRequest {
    /// Overwrites the present fields of `row` and bumps `updated_at`.
    pub fn apply_to(&self, row: &mut EventRow, now: DateTime<Utc>) {
        if let Some(ref title) = self.title {
            row.title.clone_from(title);
        }
        if let Some(ref description) = self.description {
            row.description.clone_from(description);
        }
        if let Some(ref date) = self.date {
            row.date.clone_from(date);
        }
        if let Some(ref time) = self.time {
            row.time.clone_from(time);
        }
        if let Some(ref location) = self.location {
            row.location.clone_from(location);
        }
        if let Some(category) = self.category {
            row.category = category.as_str().to_string();
        }
        if let Some(max_attendees) = self.max_attendees {
            row.max_attendees = count_column(max_attendees);
        }
        if let Some(price) = self.price {
            row.price = price;
        }
        if let Some(ref image) = self.image {
            row.image = Some(image.clone());
        }
        if let Some(status) = self.status {
            row.status = status.as_str().to_string();
        }
        row.updated_at = now;
    }
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

fn validate_capacity(max_attendees: u32) -> Result<(), ValidationError> {
    if max_attendees == 0 || max_attendees > MAX_CAPACITY {
        return Err(ValidationError::InvalidCapacity);
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

fn validate_url(url: &str) -> Result<(), ValidationError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(url.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateEventRequest {
        CreateEventRequest::builder()
            .title("Digital Marketing Workshop")
            .date("2024-03-22")
            .time("14:00")
            .category(Category::Workshop)
            .max_attendees(150)
            .build()
    }

    #[test]
    fn test_create_request_applies_defaults() {
        let new_event = request().into_new_event();

        assert_eq!(new_event.status, Status::Draft);
        assert_eq!(new_event.price, 0.0);
        assert_eq!(new_event.organizer, DEFAULT_ORGANIZER);
    }

    #[test]
    fn test_blank_organizer_falls_back_to_placeholder() {
        let mut request = request();
        request.organizer = Some("   ".to_string());

        assert_eq!(request.into_new_event().organizer, DEFAULT_ORGANIZER);
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request().validate().is_ok());

        let mut missing_title = request();
        missing_title.title = " ".to_string();
        assert_eq!(
            missing_title.validate(),
            Err(ValidationError::RequiredFieldMissing("title"))
        );

        let mut bad_date = request();
        bad_date.date = "22/03/2024".to_string();
        assert!(matches!(
            bad_date.validate(),
            Err(ValidationError::InvalidDate(_))
        ));

        let mut no_capacity = request();
        no_capacity.max_attendees = 0;
        assert_eq!(no_capacity.validate(), Err(ValidationError::InvalidCapacity));

        let mut negative_price = request();
        negative_price.price = Some(-5.0);
        assert_eq!(negative_price.validate(), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_capacity_must_fit_the_column() {
        let mut request = request();
        request.max_attendees = MAX_CAPACITY;
        assert!(request.validate().is_ok());

        request.max_attendees = 3_000_000_000;
        assert_eq!(request.validate(), Err(ValidationError::InvalidCapacity));

        let update = UpdateEventRequest::builder()
            .max_attendees(MAX_CAPACITY + 1)
            .build();
        assert_eq!(update.validate(), Err(ValidationError::InvalidCapacity));
    }

    #[test]
    fn test_invalid_image_url() {
        let mut request = request();
        request.image = Some("not-a-url".to_string());

        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let update = UpdateEventRequest::default();

        assert!(update.is_empty());
        assert_eq!(update.validate(), Err(ValidationError::EmptyUpdate));
    }

    #[test]
    fn test_new_event_row_starts_empty() {
        let now = Utc::now();
        let row = request().into_new_event().into_row("evt-9".into(), now);

        assert_eq!(row.id, "evt-9");
        assert_eq!(row.attendees, 0);
        assert_eq!(row.category, "workshop");
        assert_eq!(row.status, "draft");
        assert_eq!(row.created_at, row.updated_at);
    }

    #[test]
    fn test_update_touches_only_present_fields() {
        let created = Utc::now();
        let mut row = request().into_new_event().into_row("evt-9".into(), created);
        let update = UpdateEventRequest::builder()
            .title("Advanced Marketing Workshop")
            .status(Status::Published)
            .build();

        update.apply_to(&mut row, created + chrono::Duration::seconds(5));

        assert_eq!(row.title, "Advanced Marketing Workshop");
        assert_eq!(row.status, "published");
        assert_eq!(row.date, "2024-03-22");
        assert_eq!(row.max_attendees, 150);
        assert!(row.updated_at > row.created_at);
    }

    #[test]
    fn test_partial_update_validates_present_fields_only() {
        let update = UpdateEventRequest::builder()
            .category(Category::Seminar)
            .build();

        assert!(update.validate().is_ok());

        let update = UpdateEventRequest::builder().max_attendees(0).build();
        assert_eq!(update.validate(), Err(ValidationError::InvalidCapacity));
    }
}
