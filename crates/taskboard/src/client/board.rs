//! Board state: the fetched task list, filter criteria and an error banner.
//!
//! The list is refetched in full after every mutation. Moving a card is the
//! one exception: the new status is applied locally first and reverted if
//! the server rejects it.

use chrono::{DateTime, Utc};
use tracing::warn;

use super::ApiClient;
use crate::domain::{TaskFilter, TaskPayload, TaskStats};
use crate::entities::{Task, TaskPriority, TaskStatus};
use crate::errors::{TasksError, TasksResult};

pub const FETCH_FAILED: &str = "Failed to fetch tasks";
pub const SAVE_FAILED: &str = "Failed to save task";
pub const MOVE_FAILED: &str = "Failed to update task status. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete task";

pub struct BoardState {
    client: ApiClient,
    tasks: Vec<Task>,
    filter: TaskFilter,
    error: Option<String>,
}

impl BoardState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            error: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Every fetched task, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Current banner message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
    }

    pub fn set_status_filter(&mut self, status: Option<TaskStatus>) {
        self.filter.status = status;
    }

    pub fn set_priority_filter(&mut self, priority: Option<TaskPriority>) {
        self.filter.priority = priority;
    }

    pub fn clear_filters(&mut self) {
        self.filter = TaskFilter::default();
    }

    /// Tasks passing the current filter, in fetched order.
    pub fn visible(&self) -> Vec<Task> {
        self.filter.apply(&self.tasks)
    }

    /// Visible tasks grouped into the three board columns.
    pub fn columns(&self) -> Vec<(TaskStatus, Vec<Task>)> {
        let visible = self.visible();
        TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let column = visible
                    .iter()
                    .filter(|task| task.status == status)
                    .cloned()
                    .collect();
                (status, column)
            })
            .collect()
    }

    /// Statistics over every fetched task, ignoring the filter.
    pub fn stats(&self, now: DateTime<Utc>) -> TaskStats {
        TaskStats::from_tasks(&self.tasks, now)
    }

    /// Refetch the whole list. On failure the previous list is kept and the
    /// banner is set.
    pub async fn refresh(&mut self) -> TasksResult<()> {
        match self.client.list_tasks(&TaskFilter::default()).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e, FETCH_FAILED)),
        }
    }

    pub async fn create(&mut self, payload: &TaskPayload) -> TasksResult<Task> {
        let task = match self.client.create_task(payload).await {
            Ok(task) => task,
            Err(e) => return Err(self.fail(e, SAVE_FAILED)),
        };
        self.refresh().await?;
        Ok(task)
    }

    pub async fn update(&mut self, id: &str, payload: &TaskPayload) -> TasksResult<Task> {
        let task = match self.client.update_task(id, payload).await {
            Ok(task) => task,
            Err(e) => return Err(self.fail(e, SAVE_FAILED)),
        };
        self.refresh().await?;
        Ok(task)
    }

    pub async fn delete(&mut self, id: &str) -> TasksResult<()> {
        if let Err(e) = self.client.delete_task(id).await {
            return Err(self.fail(e, DELETE_FAILED));
        }
        self.refresh().await
    }

    /// Move a card to another column.
    ///
    /// Returns `Ok(false)` when the task is unknown or already has the
    /// status. A rejected update restores the previous status and sets the
    /// banner.
    pub async fn move_task(&mut self, id: &str, status: TaskStatus) -> TasksResult<bool> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let previous = self.tasks[index].status;
        if previous == status {
            return Ok(false);
        }

        self.tasks[index].status = status;
        let payload = TaskPayload::default().status(status.as_str());

        if let Err(e) = self.client.update_task(id, &payload).await {
            warn!(task_id = id, error = %e, "Reverting optimistic move");
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                task.status = previous;
            }
            self.error = Some(MOVE_FAILED.to_string());
            return Err(e);
        }

        self.refresh().await?;
        Ok(true)
    }

    /// Record a failure in the banner. API messages are shown verbatim,
    /// transport failures fall back to `fallback`.
    fn fail(&mut self, err: TasksError, fallback: &str) -> TasksError {
        let message = match &err {
            TasksError::Api { message, .. } => message.clone(),
            TasksError::TaskNotFound { .. } => "Task not found".to_string(),
            _ => fallback.to_string(),
        };
        self.error = Some(message);
        err
    }
}
