//! Error types for backend API calls.

use thiserror::Error;

/// Errors that can occur while talking to the backend API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered with a failure status.
    #[error("server error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the status reason.
        message: String,
    },

    /// The session is missing, expired, or not allowed to touch the sheet.
    #[error("access denied by the backend")]
    AccessDenied,

    /// The response body was not the JSON shape the endpoint promises.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The configured base URL cannot carry endpoint paths.
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

impl ApiError {
    /// Returns a user-friendly message suitable for terminal display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport(_) => {
                "Could not reach the backend. Check the base URL and your connection."
            }
            Self::Status { .. } => "The backend rejected the request.",
            Self::AccessDenied => "Your session is no longer valid. Sign in again to continue.",
            Self::Decode(_) => "The backend sent a response this tool could not read.",
            Self::BaseUrl(_) => "The base URL is not a usable http(s) URL.",
        }
    }

    /// Returns whether retrying the same call could help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
