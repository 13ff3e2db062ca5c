//! Envelope validation
//!
//! Classifies a parsed envelope as success (yielding `data`) or as one of the
//! client error kinds.

use captain_domain::{ApiStatus, CaptainError, ResponseEnvelope, Result};
use serde_json::Value;
use tracing::warn;

/// Stateless classifier for response envelopes
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeValidator;

impl EnvelopeValidator {
    /// Return `data` for the two success codes, otherwise a classified error.
    ///
    /// The orchestrator consumes an invalid-token status on the first attempt,
    /// so one reaching this point came from the retry and is reported as
    /// `CaptainError::Authentication`.
    pub fn validate(envelope: ResponseEnvelope) -> Result<Value> {
        let ResponseEnvelope { status, description, data } = envelope;

        let Some(api_status) = status.filter(|code| *code != 0).map(ApiStatus::from_code) else {
            warn!(description = %description, "response envelope carried no status");
            return Err(CaptainError::Unknown(description));
        };

        if api_status.is_success() {
            return Ok(data);
        }

        warn!(status = api_status.code(), description = %description, "API call failed");

        if api_status == ApiStatus::AuthTokenInvalid {
            let message = if description.is_empty() {
                "auth token rejected after re-authentication".to_string()
            } else {
                description
            };
            return Err(CaptainError::Authentication(message));
        }

        Err(CaptainError::Domain { status: api_status, description })
    }
}
