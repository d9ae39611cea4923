use common_errors::ErrorNotice;
use thiserror::Error;

pub const FETCH_FALLBACK: &str = "An error occurred";
pub const CREATE_FALLBACK: &str = "Failed to create event";
pub const UPDATE_FALLBACK: &str = "Failed to update event";
pub const DELETE_FALLBACK: &str = "Failed to delete event";

/// Failures raised at the `events` table boundary. Rows cross it undecoded,
/// so validation and decoding failures belong to the handlers.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Event not found: {id}")]
    NotFound { id: String },
    #[error("Connection error: {0}")]
    Connection(String),
    /// Message reported by the backend, passed through verbatim.
    #[error("{0}")]
    Query(String),
}

/// What the store client reports to the view layer. Every variant means a
/// remote operation failed and carries a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("{message}")]
    Fetch { message: String },
    #[error("{message}")]
    Create { message: String },
    #[error("{message}")]
    Update { message: String },
    #[error("{message}")]
    Delete { message: String },
}

impl EventError {
    pub fn fetch(source: impl std::fmt::Display) -> Self {
        Self::Fetch {
            message: message_or(source, FETCH_FALLBACK),
        }
    }

    pub fn create(source: impl std::fmt::Display) -> Self {
        Self::Create {
            message: message_or(source, CREATE_FALLBACK),
        }
    }

    pub fn update(source: impl std::fmt::Display) -> Self {
        Self::Update {
            message: message_or(source, UPDATE_FALLBACK),
        }
    }

    pub fn delete(source: impl std::fmt::Display) -> Self {
        Self::Delete {
            message: message_or(source, DELETE_FALLBACK),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Fetch { message }
            | Self::Create { message }
            | Self::Update { message }
            | Self::Delete { message } => message,
        }
    }

    /// Reads can be retried from the view; writes are left to the user.
    pub fn is_retryable(&self) -> bool { matches!(self, Self::Fetch { .. }) }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "FETCH_FAILED",
            Self::Create { .. } => "CREATE_FAILED",
            Self::Update { .. } => "UPDATE_FAILED",
            Self::Delete { .. } => "DELETE_FAILED",
        }
    }
}

impl From<&EventError> for ErrorNotice {
    fn from(err: &EventError) -> Self {
        if err.is_retryable() {
            ErrorNotice::retryable(err.code(), err.message())
        }
        else {
            ErrorNotice::fatal(err.code(), err.message())
        }
    }
}

fn message_or(source: impl std::fmt::Display, fallback: &str) -> String {
    let message = source.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    }
    else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_taken_from_source() {
        let err = EventError::update(TableError::NotFound {
            id: "evt-9".to_string(),
        });

        assert_eq!(err.message(), "Event not found: evt-9");
        assert!(matches!(err, EventError::Update { .. }));
    }

    #[test]
    fn test_blank_message_uses_fallback() {
        assert_eq!(EventError::fetch("").message(), FETCH_FALLBACK);
        assert_eq!(EventError::create(" ").message(), CREATE_FALLBACK);
        assert_eq!(EventError::update("").message(), UPDATE_FALLBACK);
        assert_eq!(EventError::delete("").message(), DELETE_FALLBACK);
    }

    #[test]
    fn test_blank_backend_message_uses_fallback() {
        let err = EventError::delete(TableError::Query(String::new()));

        assert_eq!(err.message(), DELETE_FALLBACK);
    }

    #[test]
    fn test_notice_offers_retry_for_reads() {
        let notice = ErrorNotice::from(&EventError::fetch("timeout"));

        assert_eq!(notice.code, "FETCH_FAILED");
        assert_eq!(notice.message, "timeout");
        assert!(notice.retryable);

        let notice = ErrorNotice::from(&EventError::delete(""));
        assert_eq!(notice.message, DELETE_FALLBACK);
        assert!(!notice.retryable);
    }

    #[test]
    fn test_only_fetch_is_retryable() {
        assert!(EventError::fetch("offline").is_retryable());
        assert!(!EventError::delete("offline").is_retryable());
    }
}
