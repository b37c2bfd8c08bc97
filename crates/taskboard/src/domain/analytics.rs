//! Aggregate statistics over the task list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Task, TaskPriority, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: TaskPriority) -> usize {
        match priority {
            TaskPriority::High => self.high,
            TaskPriority::Medium => self.medium,
            TaskPriority::Low => self.low,
        }
    }
}

/// Snapshot of the board, computed on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    /// Percentage of done tasks, one decimal
    pub completion_rate: f64,
    /// Past due and not done
    pub overdue: usize,
    pub total_estimated_time: u64,
    pub completed_estimated_time: u64,
    pub remaining_estimated_time: u64,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total: tasks.len(),
            ..Self::default()
        };

        for task in tasks {
            match task.status {
                TaskStatus::Todo => stats.by_status.todo += 1,
                TaskStatus::InProgress => stats.by_status.in_progress += 1,
                TaskStatus::Done => stats.by_status.done += 1,
            }
            match task.priority {
                TaskPriority::High => stats.by_priority.high += 1,
                TaskPriority::Medium => stats.by_priority.medium += 1,
                TaskPriority::Low => stats.by_priority.low += 1,
            }

            if task.status != TaskStatus::Done && task.due_date.is_some_and(|due| due < now) {
                stats.overdue += 1;
            }

            let minutes = u64::from(task.estimated_time.unwrap_or(0));
            stats.total_estimated_time += minutes;
            if task.status == TaskStatus::Done {
                stats.completed_estimated_time += minutes;
            }
        }

        stats.remaining_estimated_time =
            stats.total_estimated_time - stats.completed_estimated_time;
        stats.completion_rate = completion_rate(stats.by_status.done, stats.total);
        stats
    }
}

#[allow(clippy::cast_precision_loss)]
fn completion_rate(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = done as f64 / total as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}
