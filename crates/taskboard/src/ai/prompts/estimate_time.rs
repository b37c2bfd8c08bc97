//! Time estimation prompt template.

use serde::Serialize;

use super::{PromptTemplate, ESTIMATE_TIME};

/// Context for the estimate-time prompt.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateTimeContext {
    pub description: String,
}

impl EstimateTimeContext {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

pub fn template() -> PromptTemplate {
    PromptTemplate::new(ESTIMATE_TIME, SYSTEM_PROMPT, USER_PROMPT)
        .with_description("Estimate completion time in minutes")
}

const SYSTEM_PROMPT: &str = "You are a time estimation assistant. Estimate task completion time in minutes. Respond with only a number.";

const USER_PROMPT: &str = "Estimate how long it will take to complete this task in minutes.
Consider the complexity, typical work pace, and task type.
Task: {{description}}

Respond with only a number representing minutes (e.g., 30, 60, 120).";
