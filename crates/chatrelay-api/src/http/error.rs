//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{ "error": "<message>" }`, matching what relay clients
//! expect.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chatrelay_types::relay::RelayError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Relay(RelayError),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Relay(err) => {
                let status =
                    StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(err.body())).into_response()
            }
        }
    }
}
