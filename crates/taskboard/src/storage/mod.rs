//! Storage layer for task persistence.

mod memory;
mod postgrest;
mod traits;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
#[cfg(test)]
pub use traits::MockTaskStore;
pub use traits::{ListQuery, TaskStore};
