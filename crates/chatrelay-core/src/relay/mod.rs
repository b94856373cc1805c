//! Completion relay: one user message in, one generated reply out.
//!
//! [`service::CompletionRelay`] forwards a message to an [`LlmProvider`]
//! with a fixed system prompt and fixed generation parameters, and maps
//! upstream failures through [`status_table`].
//!
//! [`LlmProvider`]: crate::llm::provider::LlmProvider

pub mod service;
pub mod status_table;
