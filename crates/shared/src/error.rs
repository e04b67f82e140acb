use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidViewTarget,
    ViewNotFound,
    FetchFailed,
    DecodeFailed,
    LayoutInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("navigation target '{href}' does not name a known view")]
    InvalidViewTarget { href: String },
    #[error("no section matches view '{view_id}'")]
    ViewNotFound { view_id: String },
    #[error("failed to fetch posts from {url}: {reason}")]
    FetchFailed { url: String, reason: String },
    #[error("posts response from {url} is not a post list: {reason}")]
    DecodeFailed { url: String, reason: String },
    #[error("invalid page layout: {reason}")]
    LayoutInvalid { reason: String },
}

impl PageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PageError::InvalidViewTarget { .. } => ErrorCode::InvalidViewTarget,
            PageError::ViewNotFound { .. } => ErrorCode::ViewNotFound,
            PageError::FetchFailed { .. } => ErrorCode::FetchFailed,
            PageError::DecodeFailed { .. } => ErrorCode::DecodeFailed,
            PageError::LayoutInvalid { .. } => ErrorCode::LayoutInvalid,
        }
    }

    pub fn layout(reason: impl Into<String>) -> Self {
        PageError::LayoutInvalid {
            reason: reason.into(),
        }
    }
}

/// Serializable error report, e.g. for the CLI's JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&PageError> for ErrorReport {
    fn from(value: &PageError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
