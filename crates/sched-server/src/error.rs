use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sched_core::error::CoreError;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// An error answered to the client as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(id) => Self::not_found(format!("task {} not found", id)),
            CoreError::InvalidInput(_) | CoreError::Validation(_) | CoreError::NextDate(_) => {
                Self::bad_request(err.to_string())
            }
            CoreError::Database(_) | CoreError::Migration(_) | CoreError::Io(_) => {
                tracing::error!(error = %err, source = ?std::error::Error::source(&err), "storage failure");
                Self::internal("internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
