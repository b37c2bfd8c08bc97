//! HTTP client for the task API, plus the board state container built on
//! top of it.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::{Subtask, Suggestions, TaskFilter, TaskPayload, TaskStats, TimeEstimate};
use crate::entities::{Task, TaskPriority};
use crate::errors::{TasksError, TasksResult};

mod board;
pub mod seed;

pub use board::BoardState;

/// Default API location for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Deserialize)]
struct TaskList {
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct SingleTask {
    task: Task,
}

#[derive(Debug, Deserialize)]
struct StatsBody {
    stats: TaskStats,
}

#[derive(Debug, Deserialize)]
struct BreakdownBody {
    subtasks: Vec<Subtask>,
}

#[derive(Debug, Deserialize)]
struct PriorityBody {
    priority: TaskPriority,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct SuggestionRequest<'a> {
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<&'a str>,
}

/// Typed client for every REST route.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> TasksResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `/tasks/{id}` with the id encoded as a single path segment.
    fn task_url(&self, id: &str) -> TasksResult<Url> {
        let invalid = || TasksError::InvalidArgument {
            reason: format!("Invalid API URL: {}", self.base_url),
        };
        let mut url = Url::parse(&self.url("/tasks")).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|()| invalid())?.push(id);
        Ok(url)
    }

    /// Send a request and decode a success body. `task_id` turns a 404 into
    /// [`TasksError::TaskNotFound`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        task_id: Option<&str>,
    ) -> TasksResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "API response");

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| TasksError::Api {
                status: status.as_u16(),
                message: format!("Unexpected response body: {e}"),
            });
        }

        if let (StatusCode::NOT_FOUND, Some(task_id)) = (status, task_id) {
            return Err(TasksError::TaskNotFound {
                task_id: task_id.to_string(),
            });
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("Request failed with status {status}"));
        Err(TasksError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn health(&self) -> TasksResult<Value> {
        self.send(self.client.get(self.url("/health")), None).await
    }

    /// List tasks. Status and priority go to the server; search too.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> TasksResult<Vec<Task>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(status) = filter.status {
            params.push(("status", status.to_string()));
        }
        if let Some(priority) = filter.priority {
            params.push(("priority", priority.to_string()));
        }
        if !filter.search.trim().is_empty() {
            params.push(("search", filter.search.clone()));
        }

        let request = self.client.get(self.url("/tasks")).query(&params);
        let body: TaskList = self.send(request, None).await?;
        Ok(body.tasks)
    }

    pub async fn get_task(&self, id: &str) -> TasksResult<Task> {
        let request = self.client.get(self.task_url(id)?);
        let body: SingleTask = self.send(request, Some(id)).await?;
        Ok(body.task)
    }

    pub async fn create_task(&self, payload: &TaskPayload) -> TasksResult<Task> {
        let request = self.client.post(self.url("/tasks")).json(payload);
        let body: SingleTask = self.send(request, None).await?;
        Ok(body.task)
    }

    pub async fn update_task(&self, id: &str, payload: &TaskPayload) -> TasksResult<Task> {
        let request = self.client.put(self.task_url(id)?).json(payload);
        let body: SingleTask = self.send(request, Some(id)).await?;
        Ok(body.task)
    }

    pub async fn delete_task(&self, id: &str) -> TasksResult<()> {
        let request = self.client.delete(self.task_url(id)?);
        let _: Value = self.send(request, Some(id)).await?;
        Ok(())
    }

    pub async fn analytics(&self) -> TasksResult<TaskStats> {
        let body: StatsBody = self.send(self.client.get(self.url("/analytics")), None).await?;
        Ok(body.stats)
    }

    pub async fn breakdown(&self, description: &str) -> TasksResult<Vec<Subtask>> {
        let request = self
            .client
            .post(self.url("/ai/breakdown"))
            .json(&json!({"description": description}));
        let body: BreakdownBody = self.send(request, None).await?;
        Ok(body.subtasks)
    }

    pub async fn suggest_priority(
        &self,
        description: &str,
        due_date: Option<&str>,
    ) -> TasksResult<TaskPriority> {
        let request = self
            .client
            .post(self.url("/ai/priority"))
            .json(&SuggestionRequest {
                description,
                due_date,
            });
        let body: PriorityBody = self.send(request, None).await?;
        Ok(body.priority)
    }

    pub async fn estimate_time(&self, description: &str) -> TasksResult<TimeEstimate> {
        let request = self
            .client
            .post(self.url("/ai/time-estimate"))
            .json(&json!({"description": description}));
        self.send(request, None).await
    }

    pub async fn suggestions(
        &self,
        description: &str,
        due_date: Option<&str>,
    ) -> TasksResult<Suggestions> {
        let request = self
            .client
            .post(self.url("/ai/suggestions"))
            .json(&SuggestionRequest {
                description,
                due_date,
            });
        self.send(request, None).await
    }
}
