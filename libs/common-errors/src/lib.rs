use std::fmt;

use serde::Serialize;

pub const TRY_AGAIN: &str = "Try Again";
pub const HEADLINE: &str = "Something went wrong";

/// User-facing description of a failure, with an optional retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl ErrorNotice {
    pub fn retryable(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            retryable: true,
        }
    }

    pub fn fatal(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    pub fn internal_error(message: &str) -> Self {
        Self::fatal("INTERNAL_ERROR", message)
    }

    /// Label of the retry action, when one is offered.
    pub fn action(&self) -> Option<&'static str> {
        self.retryable.then_some(TRY_AGAIN)
    }
}

impl fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEADLINE}: {}", self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorNotice {}

impl From<anyhow::Error> for ErrorNotice {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_error(&format!("An unexpected error occurred: {err}"))
    }
}

pub type NoticeResult<T> = Result<T, ErrorNotice>;
