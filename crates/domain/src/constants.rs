//! Protocol constants
//!
//! Header names, reserved endpoints and client defaults shared by every
//! layer of the client.

// Headers attached to every request
/// Header carrying the auth token
pub const TOKEN_HEADER: &str = "x-captain-auth";
/// Header selecting the API namespace
pub const NAMESPACE_HEADER: &str = "x-namespace";
/// Namespace sent with every request
pub const NAMESPACE: &str = "captain";

/// Content type and accept value for JSON calls
pub const JSON_MEDIA_TYPE: &str = "application/json";

// Reserved endpoints
/// Endpoint exchanging a password for a token
pub const LOGIN_ENDPOINT: &str = "/login";
/// Body field holding the password
pub const LOGIN_PASSWORD_FIELD: &str = "password";
/// Field of the login `data` holding the token
pub const LOGIN_TOKEN_FIELD: &str = "token";

// Client defaults
/// Password of a freshly installed server
pub const DEFAULT_PASSWORD: &str = "captain42";
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// User agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("captain-client/", env!("CARGO_PKG_VERSION"));
