//! Authentication credential

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer token sent in the `x-captain-auth` header.
///
/// An empty credential means "unauthenticated"; the header is then omitted.
/// `Debug` output is redacted so tokens never reach the logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token returned by the server.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The unauthenticated credential
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no token is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw token, for the auth header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}
