//! # Captain Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - Password re-authentication against `/login`
//! - The [`CaptainClient`] facade
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `captain-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{CaptainClient, CaptainClientBuilder, PasswordReauthenticator};
pub use errors::InfraError;
pub use http::{HttpTransport, HttpTransportBuilder};
pub use observability::{init_tracing, LogFormat};
