//! Client-side task filtering.
//!
//! Every criterion is an independent subsequence filter, so they compose in
//! any order and re-applying the same criteria is a no-op.

use serde::{Deserialize, Serialize};

use crate::entities::{Task, TaskPriority, TaskStatus};

/// Filter criteria. Unset (or blank) criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// True when no criterion would exclude anything.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.status.is_none() && self.priority.is_none()
    }

    /// Whether a single task satisfies all criteria.
    pub fn matches(&self, task: &Task) -> bool {
        matches_search(task, &self.search)
            && self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
    }

    /// Apply every criterion, preserving the input order.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring match against title or description.
fn matches_search(task: &Task, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    task.title.to_lowercase().contains(&query)
        || task
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(&query))
}

/// Keep tasks whose title or description contains `query`.
pub fn filter_by_search(tasks: &[Task], query: &str) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| matches_search(task, query))
        .cloned()
        .collect()
}

/// Keep tasks with the given status; `None` keeps everything.
pub fn filter_by_status(tasks: &[Task], status: Option<TaskStatus>) -> Vec<Task> {
    TaskFilter {
        status,
        ..TaskFilter::default()
    }
    .apply(tasks)
}

/// Keep tasks with the given priority; `None` keeps everything.
pub fn filter_by_priority(tasks: &[Task], priority: Option<TaskPriority>) -> Vec<Task> {
    TaskFilter {
        priority,
        ..TaskFilter::default()
    }
    .apply(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewTask;
    use chrono::{TimeZone, Utc};

    fn task(
        id: &str,
        title: &str,
        description: Option<&str>,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Task {
        let mut new = NewTask::new(title);
        new.description = description.map(str::to_string);
        new.status = status;
        new.priority = priority;
        Task::from_new(id, new, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    fn sample() -> Vec<Task> {
        vec![
            task("1", "Write spec", Some("Draft the API"), TaskStatus::Todo, TaskPriority::High),
            task("2", "Review PRs", None, TaskStatus::InProgress, TaskPriority::High),
            task("3", "Deploy", Some("Ship the API to prod"), TaskStatus::Done, TaskPriority::Low),
            task("4", "api docs", Some("Publish"), TaskStatus::Todo, TaskPriority::Medium),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let tasks = sample();
        let found = filter_by_search(&tasks, "  API ");
        assert_eq!(ids(&found), vec!["1", "3", "4"]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let tasks = sample();
        assert_eq!(filter_by_search(&tasks, "   ").len(), tasks.len());
        assert_eq!(filter_by_search(&tasks, "").len(), tasks.len());
    }

    #[test]
    fn test_status_and_priority_equality() {
        let tasks = sample();
        assert_eq!(ids(&filter_by_status(&tasks, Some(TaskStatus::Todo))), vec!["1", "4"]);
        assert_eq!(ids(&filter_by_priority(&tasks, Some(TaskPriority::High))), vec!["1", "2"]);
        assert_eq!(filter_by_status(&tasks, None).len(), 4);
    }

    #[test]
    fn test_filters_are_conjunctive_and_preserve_order() {
        let tasks = sample();
        let filter = TaskFilter::new()
            .search("api")
            .status(TaskStatus::Todo);
        assert_eq!(ids(&filter.apply(&tasks)), vec!["1", "4"]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let tasks = sample();
        let filter = TaskFilter::new().search("a").priority(TaskPriority::High);
        let once = filter.apply(&tasks);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filtering_is_order_independent() {
        let tasks = sample();
        let status = Some(TaskStatus::Todo);
        let priority = Some(TaskPriority::Medium);

        let a = filter_by_search(&filter_by_priority(&filter_by_status(&tasks, status), priority), "docs");
        let b = filter_by_status(&filter_by_search(&filter_by_priority(&tasks, priority), "docs"), status);
        let c = filter_by_priority(&filter_by_status(&filter_by_search(&tasks, "docs"), status), priority);

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(ids(&a), vec!["4"]);
    }
}
