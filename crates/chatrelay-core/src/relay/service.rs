//! CompletionRelay -- stateless request handler behind `POST /api/chat`.
//!
//! Each call issues exactly one upstream request containing the fixed
//! system prompt and the verbatim user text. No history is forwarded,
//! nothing is cached, nothing is persisted, nothing is retried.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use chatrelay_types::llm::{CompletionRequest, LlmMessage};
use chatrelay_types::relay::{RelayError, RelayReply, RelayRequest};

use crate::llm::provider::LlmProvider;
use crate::relay::status_table::classify_upstream;

/// Upstream model identifier.
pub const UPSTREAM_MODEL: &str = "anthropic/claude-3-haiku";

/// Label returned to callers regardless of what the upstream reports.
pub const MODEL_LABEL: &str = "Claude 3 Haiku";

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Keep your responses concise, friendly, and engaging. You can help with various topics including coding, general questions, and conversations.";

pub const MAX_TOKENS: u32 = 1000;

pub const TEMPERATURE: f32 = 0.7;

/// Substituted when the upstream succeeds without usable text.
pub const EMPTY_REPLY_APOLOGY: &str = "Sorry, I couldn't generate a response.";

/// Forwards single messages to a completion provider.
///
/// Constructed explicitly with its provider and credential; an absent or
/// empty credential makes every call fail with
/// [`RelayError::MissingCredential`] before the provider is touched.
pub struct CompletionRelay<P: LlmProvider> {
    provider: P,
    api_key: Option<SecretString>,
}

impl<P: LlmProvider> CompletionRelay<P> {
    pub fn new(provider: P, api_key: Option<SecretString>) -> Self {
        let api_key = api_key.filter(|key| !key.expose_secret().trim().is_empty());
        Self { provider, api_key }
    }

    /// Whether a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the upstream request for one user message.
    pub fn build_request(message: &str) -> CompletionRequest {
        CompletionRequest {
            model: UPSTREAM_MODEL.to_string(),
            messages: vec![LlmMessage::system(SYSTEM_PROMPT), LlmMessage::user(message)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// Relay one message and map the outcome.
    pub async fn relay(&self, request: &RelayRequest) -> Result<RelayReply, RelayError> {
        let Some(api_key) = self.api_key.as_ref() else {
            error!(chat_id = %request.chat_id, "Completion API key not configured");
            return Err(RelayError::MissingCredential);
        };

        let upstream = Self::build_request(&request.message);
        debug!(
            chat_id = %request.chat_id,
            provider = self.provider.name(),
            model = %upstream.model,
            "Forwarding message to completion API"
        );

        match self.provider.complete(api_key, &upstream).await {
            Ok(response) => {
                let text = response
                    .content
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY_APOLOGY.to_string());
                Ok(RelayReply::new(text, MODEL_LABEL))
            }
            Err(err) => {
                error!(
                    chat_id = %request.chat_id,
                    provider = self.provider.name(),
                    status = ?err.status(),
                    error = %err,
                    "Completion API error"
                );
                Err(classify_upstream(err.status()))
            }
        }
    }
}
