use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Request-level failures surfaced to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Rate limit exceeded. Please wait a moment.")]
    RateLimitExceeded,

    #[error("Forbidden")]
    Forbidden,

    /// The external search engine call failed; the caller gets an opaque
    /// internal error while the detail goes to the log.
    #[error("search engine request failed: {0}")]
    Engine(#[from] reqwest::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, self.to_string()).into_response()
            }
            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()).into_response(),
            ApiError::Engine(err) => {
                tracing::error!(error = %err, "search engine request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
