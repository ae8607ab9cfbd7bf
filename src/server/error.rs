//! API error type with automatic JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::BlogError;

/// Failure returned by a handler.
#[derive(Debug)]
pub enum ApiError {
    /// No route matched.
    NotFound,
    /// A pipeline stage failed.
    Pipeline(BlogError),
}

/// JSON body sent for every error.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Pipeline(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BlogError> for ApiError {
    fn from(err: BlogError) -> Self {
        Self::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound => ErrorBody {
                error: "Not found".to_string(),
                code: None,
            },
            Self::Pipeline(err) => {
                if status.is_server_error() {
                    error!(kind = err.kind(), error = %err, "Error processing request");
                } else {
                    warn!(kind = err.kind(), error = %err, "Rejected request");
                }
                ErrorBody {
                    error: err.to_string(),
                    code: Some(err.kind()),
                }
            }
        };
        (status, axum::Json(body)).into_response()
    }
}
