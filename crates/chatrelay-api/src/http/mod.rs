//! HTTP layer: the completion relay endpoint and a health check.

pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use chatrelay_core::llm::provider::LlmProvider;
use chatrelay_core::relay::service::CompletionRelay;

/// State shared by the HTTP handlers.
pub struct HttpState<P: LlmProvider> {
    pub relay: Arc<CompletionRelay<P>>,
}

impl<P: LlmProvider> HttpState<P> {
    pub fn new(relay: CompletionRelay<P>) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

impl<P: LlmProvider> Clone for HttpState<P> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
        }
    }
}
