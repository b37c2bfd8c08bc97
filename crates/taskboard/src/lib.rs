#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_self)]

//! # Taskboard
//!
//! A kanban task board backed by a REST API, with AI-assisted planning.
//!
//! This crate provides:
//! - Task entities with status, priority, due date and time estimate
//! - Validation, free-text filtering, due-date classification and analytics
//! - Task stores over Supabase (PostgREST) or process memory
//! - Breakdown, priority and time-estimate suggestions from a
//!   chat-completions service
//! - An axum REST server and a typed client with board state
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use taskboard::{MemoryStore, TasksDomain, TaskPayload};
//!
//! let domain = TasksDomain::new(Arc::new(MemoryStore::new()));
//! let task = domain.create_task(TaskPayload::default().title("Write docs")).await?;
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Environment configuration
pub mod config;

// Storage layer
pub mod storage;

// Domain logic and facades
pub mod domain;

// Completion-service integration
pub mod ai;

// REST API
pub mod server;

// REST client and board state
pub mod client;

// Terminal UI helpers
pub mod ui;

// Re-export key types for convenience
pub use config::{Config, StoreKind};
pub use entities::{NewTask, Patch, Task, TaskChanges, TaskPriority, TaskStatus};
pub use errors::{TasksError, TasksResult};
pub use storage::{ListQuery, MemoryStore, PostgrestStore, TaskStore};

pub use domain::{
    SuggestionsDomain, Subtask, Suggestions, TaskFilter, TaskPayload, TaskStats, TasksDomain,
    TimeEstimate,
};

pub use ai::{AIMessage, AIProvider, AIResponse, AIRole, GenerateOptions, OpenAIProvider};

pub use client::{ApiClient, BoardState};
pub use server::{build_router, AppState};
