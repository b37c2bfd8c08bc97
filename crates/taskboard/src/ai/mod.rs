//! Completion-service integration.
//!
//! - [`AIProvider`] trait implemented by [`OpenAIProvider`]
//! - handlebars prompt templates in [`prompts`]

pub mod openai;
pub mod prompts;
pub mod provider;

pub use openai::OpenAIProvider;
pub use prompts::{PromptManager, PromptTemplate};
pub use provider::{parse_ai_response, AIMessage, AIProvider, AIResponse, AIRole, GenerateOptions, TokenUsage};
