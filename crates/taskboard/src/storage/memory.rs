//! In-process storage for local development and tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::{ListQuery, TaskStore};
use crate::entities::{NewTask, Task, TaskChanges};
use crate::errors::TasksResult;

/// Volatile task store. Tasks are kept newest first.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    fn storage_type(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, query: &ListQuery) -> TasksResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| query.matches(t)).cloned().collect())
    }

    async fn get(&self, id: &str) -> TasksResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, task: NewTask) -> TasksResult<Task> {
        let task = Task::from_new(Uuid::new_v4().to_string(), task, Utc::now());
        self.tasks.write().await.insert(0, task.clone());
        Ok(task)
    }

    async fn update(&self, id: &str, changes: TaskChanges) -> TasksResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.apply(changes);
            task.clone()
        }))
    }

    async fn delete(&self, id: &str) -> TasksResult<()> {
        self.tasks.write().await.retain(|t| t.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{TaskPriority, TaskStatus};

    #[tokio::test]
    async fn test_insert_assigns_id_and_lists_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert(NewTask::new("first")).await.unwrap();
        let second = store.insert(NewTask::new("second")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());

        let listed = store.list(&ListQuery::default()).await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_list_passes_unknown_values_through() {
        let store = MemoryStore::new();
        store.insert(NewTask::new("a")).await.unwrap();

        let query = ListQuery {
            status: Some("archived".to_string()),
            priority: None,
        };
        assert!(store.list(&query).await.unwrap().is_empty());

        let query = ListQuery {
            status: Some("todo".to_string()),
            priority: Some("medium".to_string()),
        };
        assert_eq!(store.list(&query).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let task = store.insert(NewTask::new("a")).await.unwrap();

        let updated = store
            .update(
                &task.id,
                TaskChanges {
                    status: Some(TaskStatus::Done),
                    priority: Some(TaskPriority::High),
                    ..TaskChanges::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.created_at, task.created_at);

        assert!(store
            .update("missing", TaskChanges::default())
            .await
            .unwrap()
            .is_none());

        store.delete(&task.id).await.unwrap();
        assert!(store.get(&task.id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
