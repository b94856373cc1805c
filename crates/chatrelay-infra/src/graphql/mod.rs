//! GraphQL transport for the managed data service.
//!
//! [`GraphqlClient`] posts `{ operationName, query, variables }` and
//! unwraps the `{ data, errors }` envelope into a [`RepositoryError`].

pub mod chat;
pub mod documents;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use chatrelay_types::error::RepositoryError;

use documents::Document;

/// Error codes the service uses for rejected credentials.
const AUTH_ERROR_CODES: &[&str] = &["invalid-jwt", "access-denied", "invalid-headers"];

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct ErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

/// HTTP GraphQL client with an optional bearer token.
pub struct GraphqlClient {
    client: reqwest::Client,
    url: String,
    access_token: Option<SecretString>,
}

impl GraphqlClient {
    pub fn new(url: impl Into<String>, access_token: Option<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            access_token,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run `document` and decode its `data` object into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &Document,
        variables: Value,
    ) -> Result<T, RepositoryError> {
        let body = json!({
            "operationName": document.operation_name,
            "query": document.query,
            "variables": variables,
        });
        debug!(operation = document.operation_name, "GraphQL request");

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| RepositoryError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            warn!(operation = document.operation_name, %status, "Data service rejected credentials");
            return Err(RepositoryError::Unauthorized);
        }

        let text = response
            .text()
            .await
            .map_err(|e| RepositoryError::Transport(format!("failed to read response: {e}")))?;

        let envelope: Envelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(RepositoryError::Decode(format!("invalid GraphQL envelope: {e}")));
            }
            Err(_) => {
                return Err(RepositoryError::Transport(format!("HTTP {status}: {text}")));
            }
        };

        if let Some(first) = envelope.errors.into_iter().next() {
            warn!(
                operation = document.operation_name,
                message = %first.message,
                "GraphQL error"
            );
            let code = first.extensions.and_then(|ext| ext.code);
            if code.as_deref().is_some_and(|c| AUTH_ERROR_CODES.contains(&c)) {
                return Err(RepositoryError::Unauthorized);
            }
            return Err(RepositoryError::GraphQl(first.message));
        }

        if !status.is_success() {
            return Err(RepositoryError::Transport(format!("HTTP {status}")));
        }

        let data = envelope
            .data
            .ok_or_else(|| RepositoryError::Decode("response has no data".to_string()))?;
        serde_json::from_value(data).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}
