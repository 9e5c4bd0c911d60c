//! Upstream API error types.

use thiserror::Error;

/// Result type for Intigriti API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while calling the Intigriti API.
///
/// None of the variants ever carry the API token.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    #[error("API request failed with status {status} ({}): {body}", status_reason(.status, .retry_after))]
    Upstream {
        status: u16,
        body: String,
        retry_after: Option<String>,
    },

    /// A 2xx response whose body is not JSON.
    #[error("Invalid JSON in API response: {0}")]
    InvalidResponse(String),

    /// The request URL could not be built.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a transport error from a reqwest failure.
    pub fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// The upstream HTTP status, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the token was rejected (401/403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

fn status_reason(status: &u16, retry_after: &Option<String>) -> String {
    match *status {
        401 => "authentication failed, check your API token".to_string(),
        403 => "access denied for this API token".to_string(),
        404 => "not found".to_string(),
        429 => match retry_after {
            Some(secs) => format!("rate limited, retry after {} seconds", secs),
            None => "rate limited".to_string(),
        },
        500..=599 => "upstream server error".to_string(),
        _ => "unexpected status".to_string(),
    }
}
