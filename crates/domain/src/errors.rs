//! Error types used throughout the client

use thiserror::Error;

use crate::types::ApiStatus;

/// Categories of client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network failure or an unparseable response body
    Transport,
    /// Credential rejected after the single retry, or re-authentication failed
    Authentication,
    /// The server answered with a known non-success status
    Domain,
    /// The envelope carried no usable status
    Unknown,
    /// Client-side misuse: bad configuration or a malformed request
    Client,
    /// The owning client was destroyed before the outcome was delivered
    Cancelled,
}

/// Main error type for the Captain client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptainError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("{status} ({}): {description}", .status.code())]
    Domain { status: ApiStatus, description: String },

    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl CaptainError {
    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Domain { .. } => ErrorCategory::Domain,
            Self::Unknown(_) => ErrorCategory::Unknown,
            Self::Config(_) | Self::InvalidRequest(_) => ErrorCategory::Client,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// The API status carried by a domain error, if any
    pub fn status(&self) -> Option<ApiStatus> {
        match self {
            Self::Domain { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-provided (or locally built) human-readable message
    pub fn description(&self) -> &str {
        match self {
            Self::Domain { description, .. } => description,
            Self::Transport(message)
            | Self::Authentication(message)
            | Self::Unknown(message)
            | Self::Config(message)
            | Self::InvalidRequest(message) => message,
            Self::Cancelled => "operation cancelled",
        }
    }
}

/// Result type alias for Captain client operations
pub type Result<T> = std::result::Result<T, CaptainError>;
