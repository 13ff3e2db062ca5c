//! Captain management API client
//!
//! The [`CaptainClient`] facade wires the HTTP transport, the password
//! re-authenticator and the core orchestrator together for one logical
//! client instance.

pub mod auth;
pub mod client;

pub use auth::{login_request, token_from_login_data, PasswordReauthenticator};
pub use client::{CaptainClient, CaptainClientBuilder};
