//! Suggestions domain: breakdown, priority and time estimates from a
//! completion service.
//!
//! A failed completion call is surfaced as an error. A response that
//! arrives but is malformed is repaired with fixed defaults instead.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::ai::prompts::{
    EstimateTimeContext, SuggestPriorityContext, TaskBreakdownContext, ESTIMATE_TIME,
    SUGGEST_PRIORITY, TASK_BREAKDOWN,
};
use crate::ai::{
    parse_ai_response, AIMessage, AIProvider, AIResponse, GenerateOptions, PromptManager,
};
use crate::entities::{parse_timestamp, TaskPriority};
use crate::errors::{TasksError, TasksResult};

pub const DESCRIPTION_REQUIRED: &str = "Task description is required";

/// Fallback when the model gives no number at all.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 60;
pub const MIN_ESTIMATE_MINUTES: u32 = 5;
pub const MAX_ESTIMATE_MINUTES: u32 = 480;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern is valid"));

/// A generated subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub title: String,
    pub description: String,
}

/// Clamped estimate plus its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub estimated_time: u32,
    pub estimated_time_display: String,
}

impl TimeEstimate {
    pub fn new(minutes: u32) -> Self {
        Self {
            estimated_time: minutes,
            estimated_time_display: format_duration(minutes),
        }
    }
}

/// All three hints for one description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub subtasks: Vec<Subtask>,
    pub priority: TaskPriority,
    #[serde(flatten)]
    pub estimate: TimeEstimate,
}

/// High-level suggestion operations over an injected provider.
pub struct SuggestionsDomain {
    provider: Arc<dyn AIProvider>,
    model: String,
    prompts: PromptManager,
}

impl SuggestionsDomain {
    pub fn new(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            prompts: PromptManager::default(),
        }
    }

    /// Whether suggestion features can be used at all.
    pub fn is_available(&self) -> bool {
        self.provider.is_configured()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Validate the description, then check the provider precondition.
    /// Nothing is sent to the provider unless both pass.
    fn prepare<'a>(&self, description: &'a str) -> TasksResult<&'a str> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TasksError::field("description", DESCRIPTION_REQUIRED));
        }
        if !self.is_available() {
            return Err(TasksError::ProviderNotConfigured {
                provider: self.provider.name().to_string(),
            });
        }
        Ok(description)
    }

    async fn complete(
        &self,
        template: &str,
        context: &impl Serialize,
        options: &GenerateOptions,
    ) -> TasksResult<AIResponse> {
        let (system, user) = self.prompts.render(template, context)?;
        let messages = [AIMessage::system(system), AIMessage::user(user)];
        self.provider
            .generate_text(&self.model, &messages, options)
            .await
    }

    /// Split a task into subtasks.
    #[instrument(skip(self))]
    pub async fn breakdown(&self, description: &str) -> TasksResult<Vec<Subtask>> {
        let description = self.prepare(description)?;
        self.generate_breakdown(description).await
    }

    /// Suggest a priority, defaulting to medium on an unexpected answer.
    #[instrument(skip(self))]
    pub async fn suggest_priority(
        &self,
        description: &str,
        due_date: Option<&str>,
    ) -> TasksResult<TaskPriority> {
        let description = self.prepare(description)?;
        self.generate_priority(description, due_date).await
    }

    /// Estimate completion time in minutes, clamped to [5, 480].
    #[instrument(skip(self))]
    pub async fn estimate_time(&self, description: &str) -> TasksResult<TimeEstimate> {
        let description = self.prepare(description)?;
        self.generate_estimate(description).await.map(TimeEstimate::new)
    }

    /// Request all three hints concurrently. Any failure fails the whole
    /// call.
    #[instrument(skip(self))]
    pub async fn suggestions(
        &self,
        description: &str,
        due_date: Option<&str>,
    ) -> TasksResult<Suggestions> {
        let description = self.prepare(description)?;
        let (subtasks, priority, minutes) = tokio::try_join!(
            self.generate_breakdown(description),
            self.generate_priority(description, due_date),
            self.generate_estimate(description),
        )?;

        Ok(Suggestions {
            subtasks,
            priority,
            estimate: TimeEstimate::new(minutes),
        })
    }

    async fn generate_breakdown(&self, description: &str) -> TasksResult<Vec<Subtask>> {
        let response = self
            .complete(
                TASK_BREAKDOWN,
                &TaskBreakdownContext::new(description),
                &GenerateOptions::new(0.7, 500).json(),
            )
            .await
            .map_err(|e| with_context("Failed to generate task breakdown", e))?;

        match parse_ai_response::<Value>(&response) {
            Ok(value) => Ok(normalize_subtasks(&value)),
            Err(e) => {
                warn!(error = %e, "Breakdown response was not JSON; returning no subtasks");
                Ok(Vec::new())
            }
        }
    }

    async fn generate_priority(
        &self,
        description: &str,
        due_date: Option<&str>,
    ) -> TasksResult<TaskPriority> {
        let context = SuggestPriorityContext::new(description, due_date.and_then(prompt_due_date));
        let response = self
            .complete(SUGGEST_PRIORITY, &context, &GenerateOptions::new(0.3, 10))
            .await
            .map_err(|e| with_context("Failed to suggest priority", e))?;
        Ok(normalize_priority(&response.text))
    }

    async fn generate_estimate(&self, description: &str) -> TasksResult<u32> {
        let response = self
            .complete(
                ESTIMATE_TIME,
                &EstimateTimeContext::new(description),
                &GenerateOptions::new(0.3, 10),
            )
            .await
            .map_err(|e| with_context("Failed to estimate time", e))?;
        Ok(clamp_estimate(extract_minutes(&response.text)))
    }
}

fn with_context(operation: &str, err: TasksError) -> TasksError {
    match err {
        TasksError::ProviderNotConfigured { .. } => err,
        other => TasksError::Ai(format!("{operation}: {other}")),
    }
}

/// Due date as shown to the model: the calendar day when it parses,
/// otherwise the caller's text unchanged. Blank means none.
fn prompt_due_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |due| due.format("%Y-%m-%d").to_string(),
    ))
}

/// Extract `subtasks` from a breakdown object. A missing array yields no
/// subtasks; a missing title becomes `Subtask <n>`.
pub fn normalize_subtasks(value: &Value) -> Vec<Subtask> {
    let Some(items) = value.get("subtasks").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| Subtask {
            title: text_field(item, "title").unwrap_or_else(|| format!("Subtask {}", index + 1)),
            description: text_field(item, "description").unwrap_or_default(),
        })
        .collect()
}

fn text_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Exactly `low`, `medium` or `high` after trimming and lower-casing;
/// anything else is medium.
pub fn normalize_priority(text: &str) -> TaskPriority {
    text.trim().to_lowercase().parse().unwrap_or(TaskPriority::Medium)
}

/// First run of digits in the text, or 60 when there is none. Values
/// too large for `u32` saturate.
pub fn extract_minutes(text: &str) -> u32 {
    FIRST_INTEGER
        .find(text)
        .map_or(DEFAULT_ESTIMATE_MINUTES, |m| {
            m.as_str().parse::<u32>().unwrap_or(u32::MAX)
        })
}

pub fn clamp_estimate(minutes: u32) -> u32 {
    minutes.clamp(MIN_ESTIMATE_MINUTES, MAX_ESTIMATE_MINUTES)
}

/// `2h 30m`, `2h` or `45m`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, rest) => format!("{rest}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, rest) => format!("{hours}h {rest}m"),
    }
}
