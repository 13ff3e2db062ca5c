//! # Captain Core
//!
//! Request orchestration for the Captain management API - no HTTP code.
//!
//! This crate contains:
//! - Port interfaces for the transport and the re-authentication routine
//! - Shared per-client state (credential and destroyed flag)
//! - Envelope validation, the auth-retry orchestrator and the cancellation gate
//!
//! ## Architecture Principles
//! - Only depends on `captain-domain`
//! - All I/O via traits
//! - Pure, testable orchestration logic

pub mod gate;
pub mod orchestrator;
pub mod ports;
pub mod state;
pub mod validator;

pub use gate::CancellationGate;
pub use orchestrator::RequestOrchestrator;
pub use ports::{Reauthenticator, Transport};
pub use state::ClientState;
pub use validator::EnvelopeValidator;
