//! Completion-backed query expansion for smartsearch.
//!
//! [`client::CompletionClient`] talks to one OpenAI-compatible chat endpoint
//! and returns the first choice's message content. [`expander::QueryExpander`]
//! builds on it: given a query and a summary of what the query found so far,
//! it asks the model for follow-up search keywords and returns them as a list.
//!
//! # Examples
//! ```no_run
//! use smartsearch_common::CompletionConfig;
//! use smartsearch_llm::{CompletionClient, QueryExpander};
//!
//! # #[tokio::main]
//! # async fn main() -> smartsearch_llm::Result<()> {
//! let client = CompletionClient::new(CompletionConfig::new("sk-..."))?;
//! let expander = QueryExpander::new(client);
//! let keywords = expander
//!     .expand("trigonometric functions", "Trigonometric functions relate...")
//!     .await?;
//! assert!(!keywords.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod expander;
pub mod prompts;

pub use client::{ChatMessage, CompletionClient, LlmError, Role};
pub use expander::{normalize_phrases, QueryExpander};

/// Convenient alias for results that use [`LlmError`].
pub type Result<T> = std::result::Result<T, LlmError>;
