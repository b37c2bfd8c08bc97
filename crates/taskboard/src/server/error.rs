//! Mapping from domain errors to HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::errors::TasksError;

pub const TASK_NOT_FOUND: &str = "Task not found";
pub const AI_UNAVAILABLE: &str = "AI features are not available. Please configure OPENAI_API_KEY.";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Handler error: a [`TasksError`] rendered as `{success: false, error}`.
#[derive(Debug)]
pub struct ApiError(pub TasksError);

impl From<TasksError> for ApiError {
    fn from(err: TasksError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TasksError::InvalidArgument {
            reason: rejection.body_text(),
        })
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, Value) {
        match &self.0 {
            TasksError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "error": self.0.to_string(),
                    "errors": errors,
                }),
            ),
            err @ (TasksError::InvalidStatus { .. } | TasksError::InvalidPriority { .. }) => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "error": err.to_string()}),
            ),
            TasksError::InvalidArgument { reason } => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "error": reason}),
            ),
            TasksError::TaskNotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({"success": false, "error": TASK_NOT_FOUND}),
            ),
            TasksError::ProviderNotConfigured { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"success": false, "error": AI_UNAVAILABLE}),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"success": false, "error": INTERNAL_ERROR}),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if self.0.is_client_error() {
            debug!(error = %self.0, "Rejected request");
        } else if status == StatusCode::SERVICE_UNAVAILABLE {
            warn!(error = %self.0, "Feature unavailable");
        } else if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(body)).into_response()
    }
}

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;
