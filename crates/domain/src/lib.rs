//! # Captain Domain
//!
//! Wire types and error taxonomy for the Captain management API client.
//!
//! This crate contains:
//! - The request descriptor and response envelope shapes
//! - The closed enumeration of API status codes
//! - Client error types and Result definitions
//! - Client configuration structures
//!
//! ## Architecture
//! - No dependencies on other Captain crates
//! - Only external dependencies allowed
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
