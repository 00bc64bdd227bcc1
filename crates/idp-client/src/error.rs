//! Error types for the navigation API client

use thiserror::Error;

/// Failures surfaced by the navigation API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Global sidebar layout is not editable for this user")]
    GlobalEditDenied,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a non-success response to its variant.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => ApiError::Unauthenticated,
            403 => ApiError::Forbidden(body),
            404 => ApiError::NotFound(body),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::Server { status, body },
            _ => ApiError::Status { status, body },
        }
    }

    /// HTTP status behind this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthenticated => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::Server { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::GlobalEditDenied | ApiError::Config(_) => None,
        }
    }
}

/// Result alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ApiError::from_status(401, ""), ApiError::Unauthenticated));
        assert!(matches!(ApiError::from_status(403, "feature"), ApiError::Forbidden(b) if b == "feature"));
        assert!(matches!(ApiError::from_status(404, ""), ApiError::NotFound(_)));
        assert!(matches!(ApiError::from_status(429, ""), ApiError::RateLimited));
        assert!(matches!(ApiError::from_status(503, ""), ApiError::Server { status: 503, .. }));
        assert!(matches!(ApiError::from_status(409, ""), ApiError::Status { status: 409, .. }));
    }

    #[test]
    fn test_status_round_trip() {
        for code in [401, 403, 404, 429, 500, 502, 418] {
            assert_eq!(ApiError::from_status(code, "x").status(), Some(code));
        }
        assert_eq!(ApiError::GlobalEditDenied.status(), None);
    }
}
