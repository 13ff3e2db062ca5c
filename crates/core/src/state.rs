//! Per-client shared state
//!
//! One [`ClientState`] exists per logical client and is shared through an
//! `Arc` by every in-flight call issued from that client. It holds:
//! - the current credential (last writer wins)
//! - the destroyed flag, which only ever goes from `false` to `true`

use std::sync::atomic::{AtomicBool, Ordering};

use captain_domain::Credential;
use parking_lot::RwLock;
use tracing::debug;

/// Credential and teardown flag for one client instance
#[derive(Debug, Default)]
pub struct ClientState {
    credential: RwLock<Credential>,
    destroyed: AtomicBool,
}

impl ClientState {
    /// Live state holding `credential`
    pub fn new(credential: Credential) -> Self {
        Self { credential: RwLock::new(credential), destroyed: AtomicBool::new(false) }
    }

    /// Snapshot of the current credential.
    ///
    /// A call that already took its snapshot does not see later updates.
    pub fn credential(&self) -> Credential {
        self.credential.read().clone()
    }

    /// Replace the credential for calls that start from now on
    pub fn set_credential(&self, credential: Credential) {
        *self.credential.write() = credential;
    }

    /// True when a non-empty credential is held
    pub fn is_authenticated(&self) -> bool {
        !self.credential.read().is_empty()
    }

    /// Mark the client as torn down. Irreversible.
    pub fn destroy(&self) {
        if !self.destroyed.swap(true, Ordering::AcqRel) {
            debug!("client state destroyed");
        }
    }

    /// True once [`ClientState::destroy`] has run
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }
}
