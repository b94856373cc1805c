//! OpenAI-compatible chat completion wire types (OpenRouter dialect).

use serde::{Deserialize, Serialize};

use chatrelay_types::llm::{CompletionRequest, LlmMessage};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    pub model: &'a str,
    pub messages: &'a [LlmMessage],
    pub max_tokens: u32,
    pub temperature: f32,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionBody<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Successful response body. Only the fields the relay reads are modeled.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

/// Error body: `{ "error": { "message": "...", "code": 401 } }`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_content_tolerates_missing_pieces() {
        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_content(), None);

        let no_message: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"finish_reason":"stop"}]}"#).unwrap();
        assert_eq!(no_message.first_content(), None);

        let full: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"gen-1","model":"anthropic/claude-3-haiku","choices":[{"message":{"role":"assistant","content":"Hi"}},{"message":{"content":"second"}}]}"#,
        )
        .unwrap();
        assert_eq!(full.first_content().as_deref(), Some("Hi"));
    }

    #[test]
    fn test_error_envelope_parses() {
        let env: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"message":"No auth credentials found","code":401}}"#)
                .unwrap();
        assert_eq!(env.error.message, "No auth credentials found");
    }
}
