//! Liveness check.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use chatrelay_core::llm::provider::LlmProvider;

use crate::http::HttpState;

/// GET /health
pub async fn health<P: LlmProvider + 'static>(State(state): State<HttpState<P>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.relay.provider().name(),
        "credential_configured": state.relay.has_credential(),
    }))
}
