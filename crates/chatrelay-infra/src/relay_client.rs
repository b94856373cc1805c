//! HttpRelayClient -- reaches the completion relay over HTTP.

use tracing::{debug, warn};

use chatrelay_core::send::client::RelayClient;
use chatrelay_types::relay::{
    RelayErrorBody, RelayOutcome, RelayReply, RelayRequest, RelayTransportError,
};

/// [`RelayClient`] that POSTs to a relay endpoint URL.
pub struct HttpRelayClient {
    client: reqwest::Client,
    url: String,
}

impl HttpRelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RelayClient for HttpRelayClient {
    async fn send(&self, request: &RelayRequest) -> Result<RelayOutcome, RelayTransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayTransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayTransportError::Network(e.to_string()))?;
        debug!(%status, chat_id = %request.chat_id, "Relay responded");

        if status.is_success() {
            let reply: RelayReply = serde_json::from_str(&text)
                .map_err(|e| RelayTransportError::Malformed(e.to_string()))?;
            return Ok(RelayOutcome::Reply {
                response: reply.response,
                model: reply.model,
            });
        }

        match serde_json::from_str::<RelayErrorBody>(&text) {
            Ok(body) => Ok(RelayOutcome::Rejected {
                status: status.as_u16(),
                error: body.error,
            }),
            Err(e) => {
                warn!(%status, "Relay error response had no error body");
                Err(RelayTransportError::Malformed(format!("HTTP {status}: {e}")))
            }
        }
    }
}
