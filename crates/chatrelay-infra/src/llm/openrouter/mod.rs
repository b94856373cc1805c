//! OpenRouterProvider -- concrete [`LlmProvider`] for the OpenRouter
//! chat-completion API (`/chat/completions`, OpenAI-compatible).
//!
//! Upstream failures are surfaced with their raw HTTP status so the relay
//! can map them onto client-facing messages.

pub mod types;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use chatrelay_core::llm::provider::LlmProvider;
use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use types::{ChatCompletionBody, ChatCompletionResponse, ErrorEnvelope};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenRouter completion provider.
///
/// The API key is supplied per call and only exposed when building the
/// `Authorization` header. It never appears in tracing output.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
    app_title: String,
}

impl OpenRouterProvider {
    pub fn new(app_title: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), app_title)
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(client: reqwest::Client, app_title: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            app_title: app_title.into(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(
        &self,
        api_key: &SecretString,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let body = ChatCompletionBody::from(request);
        let url = self.url("/chat/completions");
        debug!(model = %request.model, url = %url, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .header("X-Title", &self.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|env| env.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let id = parsed.id.clone();
        let model = parsed.model.clone();
        Ok(CompletionResponse {
            id,
            content: parsed.first_content(),
            model,
        })
    }
}
