//! HTTP transport for the management API

pub mod client;

pub use client::{HttpTransport, HttpTransportBuilder};
