//! Domain logic for task management.
//!
//! Pure helpers (filtering, due dates, priorities, validation, analytics)
//! plus the two facades that combine them with injected collaborators:
//! [`TasksDomain`] over a task store and [`SuggestionsDomain`] over a
//! completion provider.

pub mod analytics;
pub mod due_date;
pub mod filter;
pub mod priority;
pub mod suggestions;
mod tasks;
pub mod validation;

pub use analytics::TaskStats;
pub use due_date::{classify, classify_raw, DueDateInfo, DueStatus};
pub use filter::TaskFilter;
pub use priority::PriorityConfig;
pub use suggestions::{Subtask, Suggestions, SuggestionsDomain, TimeEstimate};
pub use tasks::TasksDomain;
pub use validation::TaskPayload;
