//! Task breakdown prompt template.
//!
//! Splits a task into 3-5 subtasks returned as a JSON object.

use serde::Serialize;

use super::{PromptTemplate, TASK_BREAKDOWN};

/// Context for the task-breakdown prompt.
#[derive(Debug, Clone, Serialize)]
pub struct TaskBreakdownContext {
    pub description: String,
}

impl TaskBreakdownContext {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

pub fn template() -> PromptTemplate {
    PromptTemplate::new(TASK_BREAKDOWN, SYSTEM_PROMPT, USER_PROMPT)
        .with_description("Break a task into actionable subtasks")
}

const SYSTEM_PROMPT: &str = r#"You are a helpful task management assistant. Break down tasks into clear, actionable subtasks. Always respond with valid JSON in the format: {"subtasks": [{"title": "...", "description": "..."}]}"#;

const USER_PROMPT: &str = r#"Break down the following task into 3-5 actionable subtasks.
Task: {{description}}

Return a JSON object with a "subtasks" array. Each subtask should have "title" and "description" fields."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::PromptManager;

    #[test]
    fn test_render() {
        let (system, user) = PromptManager::new()
            .render(TASK_BREAKDOWN, &TaskBreakdownContext::new("Plan the offsite"))
            .unwrap();
        assert!(system.contains(r#"{"subtasks": [{"title": "...", "description": "..."}]}"#));
        assert!(user.starts_with("Break down the following task into 3-5 actionable subtasks.\nTask: Plan the offsite\n\n"));
    }
}
