//! Task entity and related types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Patch;
use crate::errors::TasksError;

/// Task status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Every status, in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Column heading on the board.
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(TasksError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Task priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TasksError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Core task structure, as stored in the `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier (uuid or serial, carried as text)
    #[serde(deserialize_with = "row::id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(default, deserialize_with = "row::optional_timestamp")]
    pub due_date: Option<DateTime<Utc>>,

    /// Estimated effort in minutes
    #[serde(default)]
    pub estimated_time: Option<u32>,

    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Materialize a validated creation record with server-assigned fields.
    pub fn from_new(id: impl Into<String>, new: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            due_date: new.due_date,
            estimated_time: new.estimated_time,
            created_at,
        }
    }

    /// Apply a partial update in place. Identifier and creation time never change.
    pub fn apply(&mut self, changes: TaskChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        changes.description.apply(&mut self.description);
        changes.due_date.apply(&mut self.due_date);
        changes.estimated_time.apply(&mut self.estimated_time);
    }
}

/// Validated task-creation record (defaults already applied).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_time: Option<u32>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            estimated_time: None,
        }
    }
}

/// Validated partial update. Only supplied fields are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub due_date: Patch<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub estimated_time: Patch<u32>,
}

impl TaskChanges {
    /// Status-only update, as issued when a card is moved between columns.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_absent()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_absent()
            && self.estimated_time.is_absent()
    }
}

/// Parse a timestamp as written by clients or returned by the data store.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) and a
/// bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Lenient deserializers for rows coming back from the data store.
mod row {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        })
    }

    pub fn optional_timestamp<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{raw}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_parsing_is_strict() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("archived".parse::<TaskStatus>().is_err());
        assert!("in-progress".parse::<TaskStatus>().is_err());
        assert!("DONE".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_priority_parsing_is_strict() {
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert!("Medium".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_row_deserialization() {
        let row = json!({
            "id": 42,
            "title": "Write spec",
            "description": null,
            "status": "in_progress",
            "priority": "high",
            "due_date": "2025-03-01",
            "estimated_time": 90,
            "created_at": "2025-02-01T10:00:00.123456+00:00"
        });

        let task: Task = serde_json::from_value(row).unwrap();
        assert_eq!(task.id, "42");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(
            task.due_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(task.estimated_time, Some(90));
    }

    #[test]
    fn test_row_rejects_unknown_status() {
        let row = json!({
            "id": "abc",
            "title": "t",
            "status": "archived",
            "created_at": "2025-02-01T10:00:00Z"
        });
        assert!(serde_json::from_value::<Task>(row).is_err());
    }

    #[test]
    fn test_apply_changes_keeps_unsupplied_fields() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut new = NewTask::new("Original");
        new.description = Some("keep me".to_string());
        new.estimated_time = Some(30);
        let mut task = Task::from_new("1", new, created);

        task.apply(TaskChanges {
            status: Some(TaskStatus::Done),
            estimated_time: Patch::Null,
            ..TaskChanges::default()
        });

        assert_eq!(task.id, "1");
        assert_eq!(task.title, "Original");
        assert_eq!(task.description.as_deref(), Some("keep me"));
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.estimated_time, None);
        assert_eq!(task.created_at, created);
    }

    #[test]
    fn test_changes_serialize_only_supplied_fields() {
        let changes = TaskChanges {
            priority: Some(TaskPriority::Low),
            description: Patch::Null,
            ..TaskChanges::default()
        };
        let value = serde_json::to_value(&changes).unwrap();
        assert_eq!(value, json!({"priority": "low", "description": null}));
        assert!(TaskChanges::default().is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01T12:30:00"), Some(expected));
        assert!(parse_timestamp("2025-06-01").is_some());
        assert!(parse_timestamp("next tuesday").is_none());
    }
}
