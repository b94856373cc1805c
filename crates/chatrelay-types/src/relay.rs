//! Wire types of the completion relay endpoint.
//!
//! ```json
//! // request
//! { "message": "hello", "chatId": "c1" }
//! // 200
//! { "success": true, "response": "Hi there!", "model": "Claude 3 Haiku" }
//! // 401 / 402 / 429 / 500
//! { "error": "..." }
//! ```

use serde::{Deserialize, Serialize};

/// Body accepted by the relay endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub message: String,
    #[serde(rename = "chatId")]
    pub chat_id: String,
}

/// Successful relay response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayReply {
    pub success: bool,
    pub response: String,
    pub model: String,
}

impl RelayReply {
    pub fn new(response: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            success: true,
            response: response.into(),
            model: model.into(),
        }
    }
}

/// Error body returned with a non-200 status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
}

/// Classified relay failure.
///
/// Every variant carries a fixed user-facing message and HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("OpenRouter API key not configured. Please add OPENROUTER_API_KEY to your environment variables.")]
    MissingCredential,

    #[error("Invalid OpenRouter API key. Please check your OPENROUTER_API_KEY environment variable.")]
    InvalidCredential,

    #[error("OpenRouter API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("OpenRouter account has insufficient credits. Please add credits to your account.")]
    InsufficientCredits,

    #[error("Failed to get AI response. Please try again.")]
    Failed,
}

impl RelayError {
    /// HTTP status the endpoint answers with.
    pub fn status(self) -> u16 {
        match self {
            RelayError::MissingCredential => 500,
            RelayError::InvalidCredential => 401,
            RelayError::RateLimited => 429,
            RelayError::InsufficientCredits => 402,
            RelayError::Failed => 500,
        }
    }

    pub fn message(self) -> String {
        self.to_string()
    }

    pub fn body(self) -> RelayErrorBody {
        RelayErrorBody {
            error: self.message(),
        }
    }
}

/// What a caller of the relay observes once a response was read.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// 200 with a generated (or substituted) reply.
    Reply { response: String, model: String },
    /// The relay answered with a classified error.
    Rejected { status: u16, error: String },
}

impl From<Result<RelayReply, RelayError>> for RelayOutcome {
    fn from(result: Result<RelayReply, RelayError>) -> Self {
        match result {
            Ok(reply) => RelayOutcome::Reply {
                response: reply.response,
                model: reply.model,
            },
            Err(err) => RelayOutcome::Rejected {
                status: err.status(),
                error: err.message(),
            },
        }
    }
}

/// The relay call itself could not be completed.
#[derive(Debug, thiserror::Error)]
pub enum RelayTransportError {
    #[error("relay request failed: {0}")]
    Network(String),

    #[error("relay response malformed: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_chat_id() {
        let req: RelayRequest =
            serde_json::from_str(r#"{"message":"hello","chatId":"c1"}"#).unwrap();
        assert_eq!(req.chat_id, "c1");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["chatId"], "c1");
        assert!(json.get("chat_id").is_none());
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(RelayError::MissingCredential.status(), 500);
        assert_eq!(RelayError::InvalidCredential.status(), 401);
        assert_eq!(RelayError::RateLimited.status(), 429);
        assert_eq!(RelayError::InsufficientCredits.status(), 402);
        assert_eq!(RelayError::Failed.status(), 500);
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(RelayError::RateLimited.body()).unwrap();
        assert_eq!(
            body["error"],
            "OpenRouter API rate limit exceeded. Please try again later."
        );
    }

    #[test]
    fn test_outcome_from_result() {
        let ok: RelayOutcome = Ok(RelayReply::new("hi", "Claude 3 Haiku")).into();
        assert_eq!(
            ok,
            RelayOutcome::Reply {
                response: "hi".to_string(),
                model: "Claude 3 Haiku".to_string()
            }
        );

        let err: RelayOutcome = Err(RelayError::InsufficientCredits).into();
        match err {
            RelayOutcome::Rejected { status, error } => {
                assert_eq!(status, 402);
                assert!(error.contains("insufficient credits"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
