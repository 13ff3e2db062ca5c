//! Response envelope
//!
//! Every endpoint answers with `{ status, description, data }`. The client
//! never interprets `data`; it is handed back verbatim on success.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::status::ApiStatus;

/// Uniform wrapper around every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Raw numeric status. Absent and `0` are both treated as "no status".
    #[serde(default)]
    pub status: Option<i64>,
    /// Human-readable message. Absent and `null` both read as `""`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Payload returned on success, `null` when absent
    #[serde(default)]
    pub data: Value,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ResponseEnvelope {
    /// Build an envelope carrying a known status
    pub fn new(status: ApiStatus, description: impl Into<String>, data: Value) -> Self {
        Self { status: Some(status.code()), description: description.into(), data }
    }

    /// The classified status, or `None` when the server sent no usable code
    pub fn api_status(&self) -> Option<ApiStatus> {
        match self.status {
            None | Some(0) => None,
            Some(code) => Some(ApiStatus::from_code(code)),
        }
    }

    /// True when the server reported that the credential is no longer accepted
    pub fn is_auth_token_invalid(&self) -> bool {
        self.api_status() == Some(ApiStatus::AuthTokenInvalid)
    }
}
