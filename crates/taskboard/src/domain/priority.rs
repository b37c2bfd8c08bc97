//! Priority display and ordering.

use serde::Serialize;

use crate::entities::{Task, TaskPriority};

/// How a priority is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityConfig {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl TaskPriority {
    pub fn config(self) -> PriorityConfig {
        match self {
            Self::High => PriorityConfig {
                label: "High",
                color: "red",
                icon: "🔴",
            },
            Self::Medium => PriorityConfig {
                label: "Medium",
                color: "yellow",
                icon: "🟡",
            },
            Self::Low => PriorityConfig {
                label: "Low",
                color: "green",
                icon: "🟢",
            },
        }
    }

    /// Sort weight: high 3, medium 2, low 1.
    pub fn order(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Highest priority first. Stable, so equal priorities keep their order.
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.priority.order().cmp(&a.priority.order()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewTask;
    use chrono::Utc;

    #[test]
    fn test_config_and_order() {
        assert_eq!(TaskPriority::High.config().label, "High");
        assert_eq!(TaskPriority::Low.config().color, "green");
        assert!(TaskPriority::High.order() > TaskPriority::Medium.order());
        assert!(TaskPriority::Medium.order() > TaskPriority::Low.order());
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let now = Utc::now();
        let mut tasks: Vec<Task> = [
            ("a", TaskPriority::Low),
            ("b", TaskPriority::High),
            ("c", TaskPriority::Medium),
            ("d", TaskPriority::High),
        ]
        .into_iter()
        .map(|(id, priority)| {
            let mut new = NewTask::new(id);
            new.priority = priority;
            Task::from_new(id, new, now)
        })
        .collect();

        sort_by_priority(&mut tasks);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a"]);
    }
}
