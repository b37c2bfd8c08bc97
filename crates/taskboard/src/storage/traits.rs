//! Storage trait definitions.

use async_trait::async_trait;

use crate::entities::{NewTask, Task, TaskChanges};
use crate::errors::TasksResult;

/// Equality predicates pushed down to the store.
///
/// Values are passed through verbatim: an unrecognized status matches no
/// rows rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl ListQuery {
    /// Whether a stored task satisfies the predicates.
    pub fn matches(&self, task: &Task) -> bool {
        self.status
            .as_deref()
            .map_or(true, |status| task.status.as_str() == status)
            && self
                .priority
                .as_deref()
                .map_or(true, |priority| task.priority.as_str() == priority)
    }
}

/// Storage interface for task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Get storage type identifier
    fn storage_type(&self) -> &'static str;

    /// Load tasks matching the query, newest first
    async fn list(&self, query: &ListQuery) -> TasksResult<Vec<Task>>;

    /// Load a single task by ID
    async fn get(&self, id: &str) -> TasksResult<Option<Task>>;

    /// Persist a new task; the store assigns id and creation time
    async fn insert(&self, task: NewTask) -> TasksResult<Task>;

    /// Apply a partial update, returning `None` when no row matched
    async fn update(&self, id: &str, changes: TaskChanges) -> TasksResult<Option<Task>>;

    /// Delete a task
    async fn delete(&self, id: &str) -> TasksResult<()>;
}
