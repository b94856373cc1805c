//! Completion relay handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use tracing::{Instrument, error, info_span, warn};

use chatrelay_core::llm::provider::LlmProvider;
use chatrelay_types::relay::{RelayError, RelayReply, RelayRequest};

use crate::http::HttpState;
use crate::http::error::AppError;

/// Request body as accepted on the wire: any JSON document, with
/// `message` and `chatId` read when present.
#[derive(Debug, Default, Deserialize)]
struct RelayRequestBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "chatId")]
    chat_id: Option<String>,
}

impl RelayRequestBody {
    /// Any JSON parses; fields of the wrong type read as absent.
    fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

/// POST /api/chat - Forward one message to the completion API.
///
/// The content type is not checked. A body that is not JSON gets the
/// generic failure; a JSON body without a configured key gets the
/// configuration error.
pub async fn relay_chat<P: LlmProvider + 'static>(
    State(state): State<HttpState<P>>,
    body: Bytes,
) -> Result<Json<RelayReply>, AppError> {
    let request_id = uuid::Uuid::now_v7();
    let span = info_span!("relay_chat", %request_id);

    async move {
        let body = RelayRequestBody::parse(&body).map_err(|e| {
            warn!(error = %e, "Unreadable relay request body");
            AppError::Relay(RelayError::Failed)
        })?;

        if !state.relay.has_credential() {
            error!("Completion API key not configured");
            return Err(AppError::Relay(RelayError::MissingCredential));
        }

        let Some(message) = body.message else {
            warn!("Relay request has no message");
            return Err(AppError::Relay(RelayError::Failed));
        };

        let request = RelayRequest {
            message,
            chat_id: body.chat_id.unwrap_or_default(),
        };
        let reply = state.relay.relay(&request).await?;
        Ok(Json(reply))
    }
    .instrument(span)
    .await
}
