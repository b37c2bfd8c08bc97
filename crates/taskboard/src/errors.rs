//! Error types for the taskboard crate.

use std::collections::BTreeMap;

use thiserror::Error;

/// Field name → human readable message, produced by request validation.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Comprehensive error types for task management
#[derive(Error, Debug)]
pub enum TasksError {
    // Task errors
    #[error("Task '{task_id}' not found")]
    TaskNotFound { task_id: String },

    #[error("{}", first_message(.0))]
    Validation(FieldErrors),

    #[error("Status must be one of: todo, in_progress, done")]
    InvalidStatus { status: String },

    #[error("Priority must be one of: low, medium, high")]
    InvalidPriority { priority: String },

    // Storage errors
    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    #[error("Data store not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.")]
    StoreNotConfigured,

    // AI errors
    #[error("AI error: {0}")]
    Ai(String),

    #[error("AI provider not configured: {provider}")]
    ProviderNotConfigured { provider: String },

    #[error("AI response parse error: {reason}")]
    AiResponseParseError { reason: String },

    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success answer from the task API, as seen by a client
    #[error("{message}")]
    Api { status: u16, message: String },

    // Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    // General errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl TasksError {
    /// Build a single-field validation error.
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field, message.into());
        Self::Validation(errors)
    }

    /// Whether the error was caused by the caller's input rather than a
    /// collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidStatus { .. }
                | Self::InvalidPriority { .. }
                | Self::InvalidArgument { .. }
        )
    }
}

fn first_message(errors: &FieldErrors) -> String {
    errors
        .values()
        .next()
        .cloned()
        .unwrap_or_else(|| "Invalid request".to_string())
}

impl From<serde_json::Error> for TasksError {
    fn from(err: serde_json::Error) -> Self {
        Self::AiResponseParseError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for taskboard operations
pub type TasksResult<T> = Result<T, TasksError>;
