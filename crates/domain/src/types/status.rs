//! API status codes
//!
//! Every response envelope carries a numeric status. The set below is closed:
//! codes the client does not know about map to [`ApiStatus::Unrecognized`]
//! so that newer servers keep working.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code carried in the `status` field of a response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ApiStatus {
    Okay,
    OkayBuildStarted,
    OkayPartially,
    ErrorGeneric,
    CaptainNotInitialized,
    UserNotInitialized,
    NotAuthorized,
    AlreadyExists,
    BadName,
    WrongPassword,
    AuthTokenInvalid,
    VerificationFailed,
    IllegalOperation,
    BuildError,
    IllegalParameter,
    NotFound,
    AuthenticationFailed,
    PasswordBackOff,
    UnknownError,
    /// A code this client version does not know
    Unrecognized(i64),
}

impl ApiStatus {
    /// Map a wire code onto the enumeration. Never fails.
    pub fn from_code(code: i64) -> Self {
        match code {
            100 => Self::Okay,
            101 => Self::OkayBuildStarted,
            102 => Self::OkayPartially,
            1000 => Self::ErrorGeneric,
            1001 => Self::CaptainNotInitialized,
            1101 => Self::UserNotInitialized,
            1102 => Self::NotAuthorized,
            1103 => Self::AlreadyExists,
            1104 => Self::BadName,
            1105 => Self::WrongPassword,
            1106 => Self::AuthTokenInvalid,
            1107 => Self::VerificationFailed,
            1108 => Self::IllegalOperation,
            1109 => Self::BuildError,
            1110 => Self::IllegalParameter,
            1111 => Self::NotFound,
            1112 => Self::AuthenticationFailed,
            1113 => Self::PasswordBackOff,
            1999 => Self::UnknownError,
            other => Self::Unrecognized(other),
        }
    }

    /// The numeric wire code
    pub fn code(self) -> i64 {
        match self {
            Self::Okay => 100,
            Self::OkayBuildStarted => 101,
            Self::OkayPartially => 102,
            Self::ErrorGeneric => 1000,
            Self::CaptainNotInitialized => 1001,
            Self::UserNotInitialized => 1101,
            Self::NotAuthorized => 1102,
            Self::AlreadyExists => 1103,
            Self::BadName => 1104,
            Self::WrongPassword => 1105,
            Self::AuthTokenInvalid => 1106,
            Self::VerificationFailed => 1107,
            Self::IllegalOperation => 1108,
            Self::BuildError => 1109,
            Self::IllegalParameter => 1110,
            Self::NotFound => 1111,
            Self::AuthenticationFailed => 1112,
            Self::PasswordBackOff => 1113,
            Self::UnknownError => 1999,
            Self::Unrecognized(code) => code,
        }
    }

    /// Only these two codes resolve a call successfully.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Okay | Self::OkayBuildStarted)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Okay => "okay",
            Self::OkayBuildStarted => "okay, build started",
            Self::OkayPartially => "partially okay",
            Self::ErrorGeneric => "generic error",
            Self::CaptainNotInitialized => "captain not initialized",
            Self::UserNotInitialized => "user not initialized",
            Self::NotAuthorized => "not authorized",
            Self::AlreadyExists => "already exists",
            Self::BadName => "bad name",
            Self::WrongPassword => "wrong password",
            Self::AuthTokenInvalid => "auth token invalid",
            Self::VerificationFailed => "verification failed",
            Self::IllegalOperation => "illegal operation",
            Self::BuildError => "build error",
            Self::IllegalParameter => "illegal parameter",
            Self::NotFound => "not found",
            Self::AuthenticationFailed => "authentication failed",
            Self::PasswordBackOff => "password back-off",
            Self::UnknownError => "unknown error",
            Self::Unrecognized(_) => "unrecognized status",
        }
    }
}

impl From<i64> for ApiStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl From<ApiStatus> for i64 {
    fn from(status: ApiStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
