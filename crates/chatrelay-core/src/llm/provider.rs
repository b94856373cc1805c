//! LlmProvider trait definition.
//!
//! The abstraction the completion relay forwards through. Uses RPITIT for
//! `complete` so implementations can be plain `async fn`.

use secrecy::SecretString;

use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
///
/// The credential is passed per call rather than held by the provider so
/// the relay can detect a missing key before anything goes on the wire.
///
/// Implementations live in chatrelay-infra (e.g., `OpenRouterProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the first generated choice.
    fn complete(
        &self,
        api_key: &SecretString,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
