//! Cancellation gate
//!
//! Last stage before a caller sees an outcome. A live client gets every
//! outcome. Once the client is destroyed, outcomes are withheld according to
//! its [`DestroyPolicy`]:
//! - `Abandon`: the call never settles. The future stays pending until the
//!   caller drops it, which releases everything it holds.
//! - `Cancel`: the call settles with `CaptainError::Cancelled`.
//!
//! The check is cooperative: it runs once the outcome is ready and never
//! interrupts a request that is still in flight.

use std::sync::Arc;

use captain_domain::{CaptainError, DestroyPolicy, Result};
use tracing::debug;

use crate::state::ClientState;

/// Decides whether a settled outcome reaches the caller
#[derive(Debug, Clone)]
pub struct CancellationGate {
    state: Arc<ClientState>,
    policy: DestroyPolicy,
}

impl CancellationGate {
    /// Gate reading the destroyed flag of `state`
    pub fn new(state: Arc<ClientState>, policy: DestroyPolicy) -> Self {
        Self { state, policy }
    }

    /// Policy applied to withheld outcomes
    pub fn policy(&self) -> DestroyPolicy {
        self.policy
    }

    /// Pass `outcome` through if the client is still alive
    pub async fn deliver<T: Send>(&self, outcome: Result<T>) -> Result<T> {
        if !self.state.is_destroyed() {
            return outcome;
        }

        match self.policy {
            DestroyPolicy::Abandon => {
                debug!(succeeded = outcome.is_ok(), "client destroyed; outcome withheld");
                drop(outcome);
                std::future::pending().await
            }
            DestroyPolicy::Cancel => {
                debug!(succeeded = outcome.is_ok(), "client destroyed; outcome cancelled");
                Err(CaptainError::Cancelled)
            }
        }
    }
}
