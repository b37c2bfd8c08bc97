//! Priority suggestion prompt template.

use serde::Serialize;

use super::{PromptTemplate, SUGGEST_PRIORITY};

/// Context for the suggest-priority prompt.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestPriorityContext {
    pub description: String,
    /// Human readable due date, omitted when the task has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl SuggestPriorityContext {
    pub fn new(description: impl Into<String>, due_date: Option<String>) -> Self {
        Self {
            description: description.into(),
            due_date,
        }
    }
}

pub fn template() -> PromptTemplate {
    PromptTemplate::new(SUGGEST_PRIORITY, SYSTEM_PROMPT, USER_PROMPT)
        .with_description("Suggest low, medium or high priority")
}

const SYSTEM_PROMPT: &str = "You are a task prioritization assistant. Analyze tasks and suggest priority levels based on urgency and importance. Respond with only one word: low, medium, or high.";

const USER_PROMPT: &str = r#"Analyze the urgency and importance of this task and suggest a priority level.
Task: {{description}}
{{#if due_date}}Due date: {{due_date}}{{else}}No due date specified{{/if}}

Respond with only one word: "low", "medium", or "high"."#;
