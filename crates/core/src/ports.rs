//! Port interfaces for request orchestration
//!
//! These traits define the boundaries between the orchestration logic and
//! the infrastructure that talks to the server.

use async_trait::async_trait;
use captain_domain::{Credential, RequestDescriptor, ResponseEnvelope, Result};

/// Executes one HTTP request and parses the response envelope
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`, attaching `credential` when it is non-empty.
    ///
    /// Network failures and bodies that are not an envelope are
    /// `CaptainError::Transport`; any parsed envelope is returned as-is,
    /// whatever its status.
    async fn execute(
        &self,
        request: &RequestDescriptor,
        credential: &Credential,
    ) -> Result<ResponseEnvelope>;
}

/// Obtains a fresh credential after the server rejected the current one
#[async_trait]
pub trait Reauthenticator: Send + Sync {
    /// Perform a login exchange and return the new credential
    async fn reauthenticate(&self) -> Result<Credential>;
}
