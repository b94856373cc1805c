//! Upstream status classification.
//!
//! The relay exposes a small set of upstream failures verbatim (same
//! status, fixed message). Everything not listed collapses into
//! [`RelayError::Failed`] at 500.

use chatrelay_types::relay::RelayError;

/// Upstream HTTP status -> relay error. Extend by adding rows.
pub const UPSTREAM_STATUS_TABLE: &[(u16, RelayError)] = &[
    (401, RelayError::InvalidCredential),
    (429, RelayError::RateLimited),
    (402, RelayError::InsufficientCredits),
];

/// Classify an upstream failure. `None` means no HTTP status was received
/// (transport or decode failure).
pub fn classify_upstream(status: Option<u16>) -> RelayError {
    status
        .and_then(|status| {
            UPSTREAM_STATUS_TABLE
                .iter()
                .find(|(code, _)| *code == status)
                .map(|(_, err)| *err)
        })
        .unwrap_or(RelayError::Failed)
}
