//! Prompt template system for task suggestions.
//!
//! Each template is a pair of handlebars strings (system + user) rendered
//! against a serializable context.

use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::{TasksError, TasksResult};

mod estimate_time;
mod suggest_priority;
mod task_breakdown;

pub use estimate_time::EstimateTimeContext;
pub use suggest_priority::SuggestPriorityContext;
pub use task_breakdown::TaskBreakdownContext;

pub const TASK_BREAKDOWN: &str = "task-breakdown";
pub const SUGGEST_PRIORITY: &str = "suggest-priority";
pub const ESTIMATE_TIME: &str = "estimate-time";

/// A prompt template with system and user messages.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub id: String,
    pub description: String,
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    pub fn new(id: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            system: system.into(),
            user: user.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn system_name(id: &str) -> String {
    format!("{id}/system")
}

fn user_name(id: &str) -> String {
    format!("{id}/user")
}

/// Registry of prompt templates, compiled once at registration.
pub struct PromptManager {
    handlebars: Handlebars<'static>,
}

impl PromptManager {
    /// Create a manager with the built-in templates registered.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Prompts are plain text, task descriptions must reach the model verbatim
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut manager = Self { handlebars };
        for template in [
            task_breakdown::template(),
            suggest_priority::template(),
            estimate_time::template(),
        ] {
            manager
                .register(&template)
                .expect("built-in prompt templates are valid");
        }
        manager
    }

    /// Compile and register a template, replacing any with the same id.
    pub fn register(&mut self, template: &PromptTemplate) -> TasksResult<()> {
        self.handlebars
            .register_template_string(&system_name(&template.id), &template.system)
            .map_err(|e| TasksError::Ai(format!("Invalid system template '{}': {e}", template.id)))?;
        self.handlebars
            .register_template_string(&user_name(&template.id), &template.user)
            .map_err(|e| TasksError::Ai(format!("Invalid user template '{}': {e}", template.id)))?;
        Ok(())
    }

    /// Render a registered template, returning `(system, user)`.
    pub fn render<T: Serialize>(&self, id: &str, context: &T) -> TasksResult<(String, String)> {
        let system_name = system_name(id);
        if !self.handlebars.has_template(&system_name) {
            return Err(TasksError::Ai(format!("Template '{id}' not found")));
        }

        let system = self
            .handlebars
            .render(&system_name, context)
            .map_err(|e| TasksError::Ai(format!("Failed to render system prompt: {e}")))?;
        let user = self
            .handlebars
            .render(&user_name(id), context)
            .map_err(|e| TasksError::Ai(format!("Failed to render user prompt: {e}")))?;

        Ok((system, user))
    }
}

impl Default for PromptManager {
    fn default() -> Self {
        Self::new()
    }
}
