//! Supabase (PostgREST) storage implementation.
//!
//! Talks to the `tasks` table through the auto-generated REST interface at
//! `{SUPABASE_URL}/rest/v1/tasks`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::traits::{ListQuery, TaskStore};
use crate::entities::{NewTask, Task, TaskChanges};
use crate::errors::{TasksError, TasksResult};

const TABLE_PATH: &str = "/rest/v1/tasks";

/// Postgres "invalid text representation", returned when an id does not
/// fit the column type.
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
}

/// Task store backed by a Supabase project.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: Client,
    table_url: String,
}

impl PostgrestStore {
    /// Create a store for the project at `base_url` using its anon key.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> TasksResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(api_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {api_key}"))?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            table_url: format!("{}{TABLE_PATH}", base_url.trim_end_matches('/')),
        })
    }

    /// Send a request and decode the returned rows.
    ///
    /// `Ok(None)` means PostgREST rejected the id itself, which can only
    /// mean no such row exists.
    async fn rows(&self, request: RequestBuilder) -> TasksResult<Option<Vec<Task>>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let rows = if body.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&body).map_err(|e| TasksError::StorageError {
                    reason: format!("Failed to decode task rows: {e}"),
                })?
            };
            return Ok(Some(rows));
        }

        match serde_json::from_str::<PostgrestError>(&body) {
            Ok(error)
                if status == StatusCode::BAD_REQUEST
                    && error.code.as_deref() == Some(INVALID_TEXT_REPRESENTATION) =>
            {
                debug!(message = %error.message, "Rejected task id");
                Ok(None)
            }
            Ok(error) => Err(TasksError::StorageError {
                reason: match error.details {
                    Some(details) => format!("{status}: {} ({details})", error.message),
                    None => format!("{status}: {}", error.message),
                },
            }),
            Err(_) => Err(TasksError::StorageError {
                reason: format!("{status}: {body}"),
            }),
        }
    }

    fn by_id(&self, request: RequestBuilder, id: &str) -> RequestBuilder {
        request.query(&[("id", format!("eq.{id}"))])
    }
}

fn header_value(value: &str) -> TasksResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| TasksError::ConfigError {
        reason: format!("Invalid Supabase key: {e}"),
    })
}

#[async_trait]
impl TaskStore for PostgrestStore {
    fn storage_type(&self) -> &'static str {
        "supabase"
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> TasksResult<Vec<Task>> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(status) = &query.status {
            params.push(("status", format!("eq.{status}")));
        }
        if let Some(priority) = &query.priority {
            params.push(("priority", format!("eq.{priority}")));
        }

        let request = self.client.get(&self.table_url).query(&params);
        Ok(self.rows(request).await?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> TasksResult<Option<Task>> {
        let request = self
            .by_id(self.client.get(&self.table_url), id)
            .query(&[("select", "*")]);
        Ok(self
            .rows(request)
            .await?
            .and_then(|rows| rows.into_iter().next()))
    }

    #[instrument(skip(self, task), fields(title = %task.title))]
    async fn insert(&self, task: NewTask) -> TasksResult<Task> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .json(&[task]);

        self.rows(request)
            .await?
            .and_then(|rows| rows.into_iter().next())
            .ok_or_else(|| TasksError::StorageError {
                reason: "Insert returned no row".to_string(),
            })
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: TaskChanges) -> TasksResult<Option<Task>> {
        let request = self
            .by_id(self.client.patch(&self.table_url), id)
            .header("Prefer", "return=representation")
            .json(&changes);
        Ok(self
            .rows(request)
            .await?
            .and_then(|rows| rows.into_iter().next()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> TasksResult<()> {
        let request = self.by_id(self.client.delete(&self.table_url), id);
        self.rows(request).await.map(|_| ())
    }
}
