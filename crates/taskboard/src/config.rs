//! Configuration for the taskboard service.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::ai::openai::{DEFAULT_MODEL, OPENAI_API_URL};
use crate::errors::{TasksError, TasksResult};

/// Values shipped in `.env.example`; they count as unset.
const PLACEHOLDER_URL: &str = "your_supabase_url_here";
const PLACEHOLDER_KEY: &str = "your_supabase_anon_key_here";

/// Which task store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Supabase,
    Memory,
}

impl FromStr for StoreKind {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase),
            "memory" => Ok(Self::Memory),
            other => Err(TasksError::ConfigError {
                reason: format!("TASKBOARD_STORE must be 'supabase' or 'memory', got '{other}'"),
            }),
        }
    }
}

/// Supabase project credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    pub store: StoreKind,
    /// Present only when both URL and key are set to real values.
    pub supabase: Option<SupabaseConfig>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Chat-completions endpoint.
    pub openai_base_url: String,
    /// Timeout for outbound HTTP calls.
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            store: StoreKind::Memory,
            supabase: None,
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: OPENAI_API_URL.to_string(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> TasksResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TasksResult<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) if url != PLACEHOLDER_URL && anon_key != PLACEHOLDER_KEY => {
                Some(SupabaseConfig { url, anon_key })
            }
            _ => None,
        };

        Ok(Self {
            port: var("PORT").and_then(|s| s.parse().ok()).unwrap_or(5000),
            store: var("TASKBOARD_STORE")
                .map(|s| s.parse::<StoreKind>())
                .transpose()?
                .unwrap_or_default(),
            supabase,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_API_URL.to_string()),
            http_timeout: Duration::from_secs(
                var("HTTP_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        })
    }

    /// Supabase credentials, required when the Supabase store is selected.
    pub fn supabase(&self) -> TasksResult<&SupabaseConfig> {
        self.supabase.as_ref().ok_or(TasksError::StoreNotConfigured)
    }

    pub fn ai_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}
