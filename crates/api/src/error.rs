use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use gh_client::GithubApiError;
use serde::Serialize;

/// Terminal error taxonomy of the service. Every failure anywhere in
/// the pipeline ends up here exactly once, as a structured body with a
/// stable label, numeric status, message, and translation timestamp.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Upstream(String),
    BadRequest(String),
    RouteNotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn route_not_found(msg: impl Into<String>) -> Self {
        Self::RouteNotFound(msg.into())
    }
}

impl From<GithubApiError> for ApiError {
    fn from(err: GithubApiError) -> Self {
        let message = err.to_string();
        match err {
            GithubApiError::NotFound { .. } => Self::NotFound(message),
            GithubApiError::Unavailable { .. } => Self::Upstream(message),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    status: u16,
    message: String,
    timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "User Not Found", msg),
            ApiError::Upstream(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Upstream Service Error", msg)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            ApiError::RouteNotFound(msg) => (StatusCode::NOT_FOUND, "Not Found. Verify URL", msg),
            ApiError::Internal(detail) => {
                // Raw internal detail stays in the logs, never in the body.
                tracing::error!(detail = %detail, "unexpected application error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "unexpected internal error".to_string(),
                )
            }
        };
        let body = Json(ErrorBody {
            error: label,
            status: status.as_u16(),
            message,
            timestamp: Utc::now(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
