//! Suggestion handlers.
//!
//! The description is checked before availability, so a blank description
//! is a 400 even when no completion service is configured.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiResult;
use super::AppState;

/// Request body shared by every suggestion route.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionRequest {
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl SuggestionRequest {
    /// Non-string descriptions are treated as missing.
    fn description(&self) -> &str {
        self.description
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref().filter(|d| !d.is_empty())
    }
}

/// `POST /ai/breakdown`
pub async fn breakdown(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body?;
    let subtasks = state.suggestions.breakdown(body.description()).await?;
    Ok(Json(json!({
        "success": true,
        "count": subtasks.len(),
        "subtasks": subtasks,
    })))
}

/// `POST /ai/priority`
pub async fn priority(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body?;
    let priority = state
        .suggestions
        .suggest_priority(body.description(), body.due_date())
        .await?;
    Ok(Json(json!({
        "success": true,
        "priority": priority,
        "description": body.description().trim(),
        "due_date": body.due_date(),
    })))
}

/// `POST /ai/time-estimate`
pub async fn time_estimate(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body?;
    let estimate = state.suggestions.estimate_time(body.description()).await?;
    Ok(Json(json!({
        "success": true,
        "estimated_time": estimate.estimated_time,
        "estimated_time_display": estimate.estimated_time_display,
        "description": body.description().trim(),
    })))
}

/// `POST /ai/suggestions`
pub async fn suggestions(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body?;
    let suggestions = state
        .suggestions
        .suggestions(body.description(), body.due_date())
        .await?;
    Ok(Json(json!({
        "success": true,
        "subtasks": suggestions.subtasks,
        "priority": suggestions.priority,
        "estimated_time": suggestions.estimate.estimated_time,
        "estimated_time_display": suggestions.estimate.estimated_time_display,
        "description": body.description().trim(),
        "due_date": body.due_date(),
    })))
}
