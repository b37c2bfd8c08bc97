//! Core data structures for task management.

mod patch;
mod task;

pub use patch::Patch;
pub use task::{parse_timestamp, NewTask, Task, TaskChanges, TaskPriority, TaskStatus};
