//! HTTP server for the task API.

use std::sync::Arc;

use axum::{
    http::{StatusCode, Uri},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::ai::{AIProvider, OpenAIProvider};
use crate::config::{Config, StoreKind};
use crate::domain::{SuggestionsDomain, TasksDomain};
use crate::errors::TasksResult;
use crate::storage::{MemoryStore, PostgrestStore, TaskStore};

mod ai;
pub mod error;
mod tasks;

pub use error::{ApiError, ApiResult};

/// Shared application state. Collaborators are constructed once at startup
/// and injected here.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TasksDomain>,
    pub suggestions: Arc<SuggestionsDomain>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TaskStore>,
        provider: Arc<dyn AIProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            tasks: Arc::new(TasksDomain::new(store)),
            suggestions: Arc::new(SuggestionsDomain::new(provider, model)),
        }
    }

    /// Build the store and completion provider selected by `config`.
    pub fn from_config(config: &Config) -> TasksResult<Self> {
        let store: Arc<dyn TaskStore> = match config.store {
            StoreKind::Supabase => {
                let supabase = config.supabase()?;
                Arc::new(PostgrestStore::new(
                    &supabase.url,
                    &supabase.anon_key,
                    config.http_timeout,
                )?)
            }
            StoreKind::Memory => Arc::new(MemoryStore::new()),
        };

        let provider = OpenAIProvider::new(config.openai_api_key.clone(), config.http_timeout)?
            .with_base_url(config.openai_base_url.clone());

        info!(
            store = store.storage_type(),
            ai_enabled = provider.is_configured(),
            model = %config.openai_model,
            "Application state initialized"
        );

        Ok(Self::new(store, Arc::new(provider), config.openai_model.clone()))
    }
}

/// API routes without state, mounted at the root and under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/analytics", get(tasks::analytics))
        .route("/ai/breakdown", post(ai::breakdown))
        .route("/ai/priority", post(ai::priority))
        .route("/ai/time-estimate", post(ai::time_estimate))
        .route("/ai/suggestions", post(ai::suggestions))
}

/// Build the HTTP router for the task API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/api", get(api_info))
        .merge(api_routes())
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "AI Task Manager API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// API description.
async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "AI Task Manager API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "tasks": "/tasks",
            "analytics": "/analytics",
            "ai": "/ai",
        },
    }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.to_string(),
        })),
    )
}

/// Resolve when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
