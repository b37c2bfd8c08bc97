//! Request payload validation.
//!
//! Turns a loosely typed payload into either a [`NewTask`] / [`TaskChanges`]
//! record or a map of field errors, never both. Every problem is reported,
//! not just the first one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{parse_timestamp, NewTask, Patch, TaskChanges, TaskPriority, TaskStatus};
use crate::errors::FieldErrors;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_EMPTY: &str = "Title cannot be empty";
pub const STATUS_ALLOWED: &str = "Status must be one of: todo, in_progress, done";
pub const PRIORITY_ALLOWED: &str = "Priority must be one of: low, medium, high";
pub const DUE_DATE_FORMAT: &str =
    "Due date must be an ISO 8601 date (YYYY-MM-DD) or timestamp";
pub const ESTIMATE_FORMAT: &str =
    "Estimated time must be a non-negative whole number of minutes";

/// Task fields as sent by a client. Every field is tri-state so an update
/// can tell "not sent" from "cleared".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TaskPayload {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub priority: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub due_date: Patch<String>,
    /// Number or numeric string
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub estimated_time: Patch<Value>,
}

impl TaskPayload {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Patch::Value(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Patch::Value(description.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Patch::Value(status.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Patch::Value(priority.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Patch::Value(due_date.into());
        self
    }

    pub fn estimated_time(mut self, minutes: u32) -> Self {
        self.estimated_time = Patch::Value(Value::from(minutes));
        self
    }
}

/// Validate a creation payload, applying `status=todo` and
/// `priority=medium` when they are omitted.
pub fn validate_create(payload: TaskPayload) -> Result<NewTask, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match payload.title {
        Patch::Value(title) if !title.trim().is_empty() => Some(title.trim().to_string()),
        _ => {
            errors.insert("title", TITLE_REQUIRED.to_string());
            None
        }
    };

    let description = optional_text(payload.description).into_option().flatten();

    let status = match non_blank(payload.status) {
        None => Some(TaskStatus::default()),
        Some(raw) => record(&mut errors, "status", parse_status(&raw)),
    };

    let priority = match non_blank(payload.priority) {
        None => Some(TaskPriority::default()),
        Some(raw) => record(&mut errors, "priority", parse_priority(&raw)),
    };

    let due_date = record(&mut errors, "due_date", due_date(payload.due_date))
        .and_then(|patch| patch.into_option().flatten());
    let estimated_time = record(
        &mut errors,
        "estimated_time",
        estimated_time(payload.estimated_time),
    )
    .and_then(|patch| patch.into_option().flatten());

    match (title, status, priority) {
        (Some(title), Some(status), Some(priority)) if errors.is_empty() => Ok(NewTask {
            title,
            description,
            status,
            priority,
            due_date,
            estimated_time,
        }),
        _ => Err(errors),
    }
}

/// Validate a partial update. Only supplied fields end up in the record;
/// enum fields are re-checked on every call.
pub fn validate_update(payload: TaskPayload) -> Result<TaskChanges, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut changes = TaskChanges::default();

    match payload.title {
        Patch::Absent => {}
        Patch::Value(title) if !title.trim().is_empty() => {
            changes.title = Some(title.trim().to_string());
        }
        Patch::Null | Patch::Value(_) => {
            errors.insert("title", TITLE_EMPTY.to_string());
        }
    }

    changes.description = optional_text(payload.description);

    match payload.status {
        Patch::Absent => {}
        Patch::Null => {
            errors.insert("status", STATUS_ALLOWED.to_string());
        }
        Patch::Value(raw) => changes.status = record(&mut errors, "status", parse_status(&raw)),
    }

    match payload.priority {
        Patch::Absent => {}
        Patch::Null => {
            errors.insert("priority", PRIORITY_ALLOWED.to_string());
        }
        Patch::Value(raw) => {
            changes.priority = record(&mut errors, "priority", parse_priority(&raw));
        }
    }

    if let Some(patch) = record(&mut errors, "due_date", due_date(payload.due_date)) {
        changes.due_date = patch;
    }
    if let Some(patch) = record(
        &mut errors,
        "estimated_time",
        estimated_time(payload.estimated_time),
    ) {
        changes.estimated_time = patch;
    }

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

fn record<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    result: Result<T, &'static str>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(field, message.to_string());
            None
        }
    }
}

fn non_blank(patch: Patch<String>) -> Option<String> {
    match patch {
        Patch::Value(raw) if !raw.trim().is_empty() => Some(raw),
        _ => None,
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, &'static str> {
    raw.parse().map_err(|_| STATUS_ALLOWED)
}

fn parse_priority(raw: &str) -> Result<TaskPriority, &'static str> {
    raw.parse().map_err(|_| PRIORITY_ALLOWED)
}

/// Blank text counts as cleared.
fn optional_text(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Value(text) if text.trim().is_empty() => Patch::Null,
        other => other,
    }
}

fn due_date(patch: Patch<String>) -> Result<Patch<DateTime<Utc>>, &'static str> {
    match optional_text(patch) {
        Patch::Absent => Ok(Patch::Absent),
        Patch::Null => Ok(Patch::Null),
        Patch::Value(raw) => parse_timestamp(&raw)
            .map(Patch::Value)
            .ok_or(DUE_DATE_FORMAT),
    }
}

fn estimated_time(patch: Patch<Value>) -> Result<Patch<u32>, &'static str> {
    match patch {
        Patch::Absent => Ok(Patch::Absent),
        Patch::Null => Ok(Patch::Null),
        Patch::Value(Value::String(raw)) if raw.trim().is_empty() => Ok(Patch::Null),
        Patch::Value(value) => parse_minutes(&value).map(Patch::Value).ok_or(ESTIMATE_FORMAT),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_minutes(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => raw.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= f64::from(u32::MAX)
    {
        Some(number as u32)
    } else {
        None
    }
}
