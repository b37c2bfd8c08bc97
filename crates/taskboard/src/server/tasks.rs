//! Task CRUD and analytics handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiResult;
use super::AppState;
use crate::domain::TaskPayload;
use crate::storage::ListQuery;

/// `GET /tasks` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Empty parameters are ignored rather than matched literally.
    fn into_parts(self) -> (ListQuery, String) {
        let non_empty = |v: Option<String>| v.filter(|v| !v.is_empty());
        (
            ListQuery {
                status: non_empty(self.status),
                priority: non_empty(self.priority),
            },
            self.search.unwrap_or_default(),
        )
    }
}

/// `GET /tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Value>> {
    let (query, search) = params.into_parts();
    let tasks = state.tasks.list_tasks(&query, &search).await?;
    Ok(Json(json!({
        "success": true,
        "count": tasks.len(),
        "tasks": tasks,
    })))
}

/// `GET /tasks/{id}`
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let task = state.tasks.get_task(&id).await?;
    Ok(Json(json!({"success": true, "task": task})))
}

/// `POST /tasks`
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(payload) = payload?;
    let task = state.tasks.create_task(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Task created successfully",
            "task": task,
        })),
    ))
}

/// `PUT /tasks/{id}`
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(payload) = payload?;
    let task = state.tasks.update_task(&id, payload).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Task updated successfully",
        "task": task,
    })))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.tasks.delete_task(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Task deleted successfully",
    })))
}

/// `GET /analytics`
pub async fn analytics(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let stats = state.tasks.stats(Utc::now()).await?;
    Ok(Json(json!({"success": true, "stats": stats})))
}
