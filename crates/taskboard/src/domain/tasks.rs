//! Tasks domain facade.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::analytics::TaskStats;
use super::filter::filter_by_search;
use super::validation::{validate_create, validate_update, TaskPayload};
use crate::entities::Task;
use crate::errors::{TasksError, TasksResult};
use crate::storage::{ListQuery, TaskStore};

/// Tasks domain facade providing high-level task operations
pub struct TasksDomain {
    store: Arc<dyn TaskStore>,
}

impl TasksDomain {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn storage_type(&self) -> &'static str {
        self.store.storage_type()
    }

    /// List tasks newest first, then narrow by free-text search.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, query: &ListQuery, search: &str) -> TasksResult<Vec<Task>> {
        let tasks = self.store.list(query).await?;
        if search.trim().is_empty() {
            Ok(tasks)
        } else {
            Ok(filter_by_search(&tasks, search))
        }
    }

    /// Get a specific task by ID
    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: &str) -> TasksResult<Task> {
        self.store
            .get(task_id)
            .await?
            .ok_or_else(|| TasksError::TaskNotFound {
                task_id: task_id.to_string(),
            })
    }

    /// Validate and create a task.
    #[instrument(skip(self, payload))]
    pub async fn create_task(&self, payload: TaskPayload) -> TasksResult<Task> {
        let new = validate_create(payload).map_err(TasksError::Validation)?;
        let task = self.store.insert(new).await?;
        info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// Validate and apply a partial update. An update with no fields
    /// returns the task unchanged.
    #[instrument(skip(self, payload))]
    pub async fn update_task(&self, task_id: &str, payload: TaskPayload) -> TasksResult<Task> {
        let changes = validate_update(payload).map_err(TasksError::Validation)?;
        if changes.is_empty() {
            return self.get_task(task_id).await;
        }

        let task = self
            .store
            .update(task_id, changes)
            .await?
            .ok_or_else(|| TasksError::TaskNotFound {
                task_id: task_id.to_string(),
            })?;
        info!(task_id = %task.id, "Task updated");
        Ok(task)
    }

    /// Delete a task. Existence is checked first, so deleting twice reports
    /// not-found the second time.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: &str) -> TasksResult<()> {
        let task = self.get_task(task_id).await?;
        self.store.delete(&task.id).await?;
        info!(task_id = %task.id, "Task deleted");
        Ok(())
    }

    /// Statistics over every stored task.
    pub async fn stats(&self, now: DateTime<Utc>) -> TasksResult<TaskStats> {
        let tasks = self.store.list(&ListQuery::default()).await?;
        Ok(TaskStats::from_tasks(&tasks, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{NewTask, TaskPriority, TaskStatus};
    use crate::storage::{MemoryStore, MockTaskStore};
    use serde_json::json;

    fn payload(value: serde_json::Value) -> TaskPayload {
        serde_json::from_value(value).unwrap()
    }

    fn stored(id: &str, title: &str) -> Task {
        Task::from_new(id, NewTask::new(title), Utc::now())
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let domain = TasksDomain::new(Arc::new(MemoryStore::new()));
        let task = domain
            .create_task(payload(json!({"title": "Write spec"})))
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(!task.id.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let mut store = MockTaskStore::new();
        store.expect_insert().never();
        let domain = TasksDomain::new(Arc::new(store));

        let err = domain
            .create_task(payload(json!({"title": "x", "priority": "urgent"})))
            .await
            .unwrap_err();
        assert!(matches!(err, TasksError::Validation(ref e) if e.contains_key("priority")));
    }

    #[tokio::test]
    async fn test_update_with_invalid_status_is_rejected() {
        let mut store = MockTaskStore::new();
        store.expect_update().never();
        let domain = TasksDomain::new(Arc::new(store));

        let err = domain
            .update_task("1", payload(json!({"status": "archived"})))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status must be one of: todo, in_progress, done"
        );
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let mut store = MockTaskStore::new();
        store
            .expect_update()
            .withf(|id, changes| id == "404" && changes.status == Some(TaskStatus::Done))
            .times(1)
            .returning(|_, _| Ok(None));
        let domain = TasksDomain::new(Arc::new(store));

        let err = domain
            .update_task("404", payload(json!({"status": "done"})))
            .await
            .unwrap_err();
        assert!(matches!(err, TasksError::TaskNotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_update_reads_instead_of_writing() {
        let mut store = MockTaskStore::new();
        store.expect_update().never();
        store
            .expect_get()
            .returning(|id| Ok(Some(stored(id, "unchanged"))));
        let domain = TasksDomain::new(Arc::new(store));

        let task = domain.update_task("7", TaskPayload::default()).await.unwrap();
        assert_eq!(task.title, "unchanged");
    }

    #[tokio::test]
    async fn test_delete_missing_task_issues_no_delete() {
        let mut store = MockTaskStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store.expect_delete().never();
        let domain = TasksDomain::new(Arc::new(store));

        let err = domain.delete_task("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Task 'nope' not found");
    }

    #[tokio::test]
    async fn test_double_delete_reports_not_found() {
        let domain = TasksDomain::new(Arc::new(MemoryStore::new()));
        let task = domain
            .create_task(payload(json!({"title": "once"})))
            .await
            .unwrap();

        domain.delete_task(&task.id).await.unwrap();
        let err = domain.delete_task(&task.id).await.unwrap_err();
        assert!(matches!(err, TasksError::TaskNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_applies_search_after_store_query() {
        let mut store = MockTaskStore::new();
        store
            .expect_list()
            .withf(|query| query.status.as_deref() == Some("todo"))
            .returning(|_| Ok(vec![stored("1", "Write docs"), stored("2", "Deploy")]));
        let domain = TasksDomain::new(Arc::new(store));

        let query = ListQuery {
            status: Some("todo".to_string()),
            priority: None,
        };
        let tasks = domain.list_tasks(&query, "DOCS").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "1");
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut store = MockTaskStore::new();
        store.expect_list().returning(|_| {
            Err(TasksError::StorageError {
                reason: "down".to_string(),
            })
        });
        let domain = TasksDomain::new(Arc::new(store));

        let err = domain.stats(Utc::now()).await.unwrap_err();
        assert!(matches!(err, TasksError::StorageError { .. }));
    }
}
