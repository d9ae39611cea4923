use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::events::RowDecodeError;

/// Kind of gathering an event represents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Conference,
    Workshop,
    Seminar,
    Networking,
    Social,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Conference,
        Category::Workshop,
        Category::Seminar,
        Category::Networking,
        Category::Social,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Conference => "conference",
            Category::Workshop => "workshop",
            Category::Seminar => "seminar",
            Category::Networking => "networking",
            Category::Social => "social",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Conference => "Conference",
            Category::Workshop => "Workshop",
            Category::Seminar => "Seminar",
            Category::Networking => "Networking",
            Category::Social => "Social",
            Category::Other => "Other",
        }
    }

    /// Colour token used by the analytics category legend. `Other` is the
    /// neutral bucket.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Conference => "primary",
            Category::Workshop => "emerald",
            Category::Seminar => "amber",
            Category::Networking => "red",
            Category::Social => "purple",
            Category::Other => "gray",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Conference => "bi-people",
            Category::Workshop => "bi-tools",
            Category::Seminar => "bi-mortarboard",
            Category::Networking => "bi-chat-dots",
            Category::Social => "bi-heart",
            Category::Other => "bi-calendar-event",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RowDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| RowDecodeError::UnknownCategory(s.to_string()))
    }
}

/// Publication lifecycle of an event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Draft,
        Status::Published,
        Status::Cancelled,
        Status::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Published => "published",
            Status::Cancelled => "cancelled",
            Status::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Published => "Published",
            Status::Cancelled => "Cancelled",
            Status::Completed => "Completed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Status::Draft => "gray",
            Status::Published => "emerald",
            Status::Cancelled => "red",
            Status::Completed => "primary",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RowDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RowDecodeError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = "meetup".parse::<Category>();

        assert_eq!(
            result,
            Err(RowDecodeError::UnknownCategory("meetup".to_string()))
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Published).unwrap();

        assert_eq!(json, "\"published\"");
    }

    #[test]
    fn test_status_parse_is_case_sensitive() {
        assert!("Draft".parse::<Status>().is_err());
        assert_eq!("draft".parse::<Status>(), Ok(Status::Draft));
    }
}
