//! Shared test helpers for `captain-core` integration tests.
//!
//! These helpers provide in-memory implementations of the orchestration
//! ports so that tests can script server behaviour and inspect exactly what
//! was sent.

pub mod transport;

pub use transport::{CountingReauthenticator, GatedTransport, ScriptedTransport};
