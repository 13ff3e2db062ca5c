use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use captain_core::{Reauthenticator, Transport};
use captain_domain::{CaptainError, Credential, RequestDescriptor, ResponseEnvelope, Result};
use tokio::sync::Notify;

/// A request as observed by a mock transport
pub type SeenRequest = (RequestDescriptor, Credential);

/// In-memory mock for `Transport`.
///
/// Replays a fixed script of outcomes in order and records every request
/// together with the credential it carried.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<ResponseEnvelope>>>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl ScriptedTransport {
    /// Create a new mock seeded with the provided outcomes.
    pub fn new(outcomes: Vec<Result<ResponseEnvelope>>) -> Arc<Self> {
        Arc::new(Self { outcomes: Mutex::new(outcomes.into()), seen: Mutex::default() })
    }

    /// Every request received so far
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        credential: &Credential,
    ) -> Result<ResponseEnvelope> {
        self.seen.lock().unwrap().push((request.clone(), credential.clone()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CaptainError::Transport("no scripted response left".into())))
    }
}

/// Transport that holds every request until the test releases it.
///
/// Lets a test act (destroy the client, refresh the credential) while a
/// request is in flight.
pub struct GatedTransport {
    inner: Arc<ScriptedTransport>,
    started: Notify,
    release: Notify,
}

impl GatedTransport {
    pub fn new(outcomes: Vec<Result<ResponseEnvelope>>) -> Arc<Self> {
        Arc::new(Self {
            inner: ScriptedTransport::new(outcomes),
            started: Notify::new(),
            release: Notify::new(),
        })
    }

    /// Wait until a request has reached the transport
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let one held request complete
    pub fn release_one(&self) {
        self.release.notify_one();
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.inner.seen()
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        credential: &Credential,
    ) -> Result<ResponseEnvelope> {
        self.started.notify_one();
        self.release.notified().await;
        self.inner.execute(request, credential).await
    }
}

/// Reauthenticator that hands out a fixed sequence of credentials
pub struct CountingReauthenticator {
    credentials: Mutex<VecDeque<Credential>>,
    calls: AtomicUsize,
}

impl CountingReauthenticator {
    pub fn new(credentials: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            credentials: Mutex::new(credentials.iter().map(|c| Credential::from(*c)).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Reauthenticator for CountingReauthenticator {
    async fn reauthenticate(&self) -> Result<Credential> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.credentials
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CaptainError::Authentication("Wrong password".into()))
    }
}
