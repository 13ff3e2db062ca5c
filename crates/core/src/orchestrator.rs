//! Auth-retry request orchestrator
//!
//! Runs one API call through its states:
//!
//! ```text
//! FIRST_ATTEMPT -> (auth token invalid?) -> REAUTHENTICATING -> RETRY_ATTEMPT
//!               -> VALIDATED -> DELIVERED | ABANDONED
//! ```
//!
//! The retry happens at most once per call. Only the invalid-token status
//! triggers it; every other failure is validated and reported as is.

use std::sync::Arc;
use std::time::Duration;

use captain_domain::{
    CaptainError, Credential, DestroyPolicy, RequestDescriptor, ResponseEnvelope, Result,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::gate::CancellationGate;
use crate::ports::{Reauthenticator, Transport};
use crate::state::ClientState;
use crate::validator::EnvelopeValidator;

/// Orchestrates transport, re-authentication, validation and the gate
pub struct RequestOrchestrator {
    transport: Arc<dyn Transport>,
    reauthenticator: Arc<dyn Reauthenticator>,
    state: Arc<ClientState>,
    gate: CancellationGate,
    simulated_latency: Option<Duration>,
}

impl RequestOrchestrator {
    /// Create a new orchestrator bound to one client's state
    pub fn new(
        transport: Arc<dyn Transport>,
        reauthenticator: Arc<dyn Reauthenticator>,
        state: Arc<ClientState>,
    ) -> Self {
        let gate = CancellationGate::new(Arc::clone(&state), DestroyPolicy::default());
        Self { transport, reauthenticator, state, gate, simulated_latency: None }
    }

    /// Choose how outcomes are handled once the client is destroyed
    pub fn with_destroy_policy(mut self, policy: DestroyPolicy) -> Self {
        self.gate = CancellationGate::new(Arc::clone(&self.state), policy);
        self
    }

    /// Delay every call before its first attempt
    pub fn with_simulated_latency(mut self, latency: Option<Duration>) -> Self {
        self.simulated_latency = latency;
        self
    }

    /// State shared with the re-authenticator and sibling calls
    pub fn state(&self) -> &Arc<ClientState> {
        &self.state
    }

    /// Policy applied by the cancellation gate
    pub fn destroy_policy(&self) -> DestroyPolicy {
        self.gate.policy()
    }

    /// Run one call and return the envelope's `data` on success.
    ///
    /// # Errors
    /// - `CaptainError::Transport` if a request could not be sent or parsed
    /// - `CaptainError::Authentication` if re-authentication failed or the
    ///   retried attempt was rejected again
    /// - `CaptainError::Domain` / `CaptainError::Unknown` for other failures
    /// - `CaptainError::Cancelled` if the client was destroyed under
    ///   `DestroyPolicy::Cancel`
    ///
    /// Under `DestroyPolicy::Abandon` a destroyed client's call never
    /// completes.
    #[instrument(skip(self, request), fields(method = %request.method(), endpoint = %request.endpoint()))]
    pub async fn orchestrate(&self, request: &RequestDescriptor) -> Result<Value> {
        let outcome = self.run(request).await;
        self.gate.deliver(outcome).await
    }

    async fn run(&self, request: &RequestDescriptor) -> Result<Value> {
        if let Some(latency) = self.simulated_latency {
            tokio::time::sleep(latency).await;
        }

        let credential = self.state.credential();
        let envelope = self.attempt(request, &credential, false).await?;

        let envelope = if envelope.is_auth_token_invalid() {
            info!("credential rejected; re-authenticating");
            let fresh = self.reauthenticate().await?;
            self.state.set_credential(fresh.clone());
            self.attempt(request, &fresh, true).await?
        } else {
            envelope
        };

        EnvelopeValidator::validate(envelope)
    }

    async fn attempt(
        &self,
        request: &RequestDescriptor,
        credential: &Credential,
        retry: bool,
    ) -> Result<ResponseEnvelope> {
        debug!(retry, authenticated = !credential.is_empty(), "dispatching request");

        let envelope = self.transport.execute(request, credential).await.map_err(|err| {
            warn!(retry, error = %err, "transport failure");
            err
        })?;

        debug!(retry, status = ?envelope.status, "received envelope");
        Ok(envelope)
    }

    async fn reauthenticate(&self) -> Result<Credential> {
        let credential = match self.reauthenticator.reauthenticate().await {
            Ok(credential) => credential,
            Err(CaptainError::Authentication(message)) => {
                warn!(error = %message, "re-authentication rejected");
                return Err(CaptainError::Authentication(message));
            }
            Err(err) => {
                warn!(error = %err, "re-authentication failed");
                return Err(CaptainError::Authentication(format!(
                    "re-authentication failed: {err}"
                )));
            }
        };

        if credential.is_empty() {
            warn!("re-authentication returned an empty credential");
            return Err(CaptainError::Authentication(
                "re-authentication returned an empty credential".to_string(),
            ));
        }

        info!("re-authentication succeeded");
        Ok(credential)
    }
}
