use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::warning;

/// Failures of the request path.
///
/// Each variant maps to exactly one response shape, so clients only ever see
/// the generic `401`/`500` bodies while logs and tests keep the real cause.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("Spotify authorization failed: {0}")]
    UpstreamAuth(String),

    #[error("Spotify request failed: {0}")]
    UpstreamFetch(#[from] reqwest::Error),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "User not authenticated" })),
            )
                .into_response(),
            AppError::UpstreamAuth(_) => {
                warning!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error authenticating with Spotify",
                )
                    .into_response()
            }
            AppError::UpstreamFetch(_) => {
                warning!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch Spotify data" })),
                )
                    .into_response()
            }
            AppError::Persistence(_) | AppError::Config(_) => {
                warning!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_is_401() {
        let res = AppError::Unauthenticated.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_auth_failure_is_plain_500() {
        let res = AppError::UpstreamAuth("bad code".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = res
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/plain"));
    }

    #[test]
    fn test_persistence_failure_is_500() {
        let res = AppError::Persistence("down".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
