//! RelayClient trait -- how the send sequence reaches the completion relay.
//!
//! Over HTTP in normal operation (`HttpRelayClient` in chatrelay-infra), or
//! in-process by calling a [`CompletionRelay`] directly.

use chatrelay_types::relay::{RelayOutcome, RelayRequest, RelayTransportError};

use crate::llm::provider::LlmProvider;
use crate::relay::service::CompletionRelay;

/// Client for the completion relay.
///
/// `Ok` means the relay answered (with a reply or a classified error);
/// `Err` means no usable answer was obtained at all.
pub trait RelayClient: Send + Sync {
    fn send(
        &self,
        request: &RelayRequest,
    ) -> impl std::future::Future<Output = Result<RelayOutcome, RelayTransportError>> + Send;
}

/// In-process relay: never fails at the transport level.
impl<P: LlmProvider> RelayClient for CompletionRelay<P> {
    async fn send(&self, request: &RelayRequest) -> Result<RelayOutcome, RelayTransportError> {
        Ok(self.relay(request).await.into())
    }
}
