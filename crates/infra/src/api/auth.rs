//! Password re-authentication
//!
//! Exchanges the configured password for a fresh token via `POST /login`.
//! The exchange goes straight to the transport: it never passes through the
//! orchestrator, so a rejected login cannot trigger another login.

use std::sync::Arc;

use async_trait::async_trait;
use captain_core::{ClientState, EnvelopeValidator, Reauthenticator, Transport};
use captain_domain::constants::{LOGIN_ENDPOINT, LOGIN_PASSWORD_FIELD, LOGIN_TOKEN_FIELD};
use captain_domain::{CaptainError, Credential, RequestDescriptor, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Build the `/login` request for `password`
pub fn login_request(password: &str) -> RequestDescriptor {
    RequestDescriptor::post_json(LOGIN_ENDPOINT).with_param(LOGIN_PASSWORD_FIELD, password)
}

/// Extract the token from the `data` of a successful login envelope
///
/// # Errors
///
/// Returns `CaptainError::Authentication` if `data.token` is missing, not a
/// string, or empty
pub fn token_from_login_data(data: &Value) -> Result<Credential> {
    data.get(LOGIN_TOKEN_FIELD)
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(Credential::from)
        .ok_or_else(|| {
            CaptainError::Authentication("login response did not contain a token".to_string())
        })
}

/// Re-authenticates by logging in with a stored password
pub struct PasswordReauthenticator {
    transport: Arc<dyn Transport>,
    state: Arc<ClientState>,
    password: String,
}

impl PasswordReauthenticator {
    /// Create a new password re-authenticator
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport used for the login exchange
    /// * `state` - Client state whose current credential accompanies the login
    /// * `password` - Password sent to `/login`
    pub fn new(
        transport: Arc<dyn Transport>,
        state: Arc<ClientState>,
        password: impl Into<String>,
    ) -> Self {
        Self { transport, state, password: password.into() }
    }
}

#[async_trait]
impl Reauthenticator for PasswordReauthenticator {
    async fn reauthenticate(&self) -> Result<Credential> {
        debug!("Logging in to obtain a fresh token");

        let request = login_request(&self.password);
        let envelope = self
            .transport
            .execute(&request, &self.state.credential())
            .await
            .map_err(|e| CaptainError::Authentication(format!("login request failed: {e}")))?;

        let data = EnvelopeValidator::validate(envelope).map_err(|e| {
            warn!(error = %e, "Login rejected");
            CaptainError::Authentication(format!("login rejected: {e}"))
        })?;

        let credential = token_from_login_data(&data)?;
        info!("Login succeeded");
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use captain_domain::{ApiStatus, ResponseEnvelope};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::HttpTransport;

    fn reauthenticator(server: &MockServer, password: &str) -> PasswordReauthenticator {
        let transport = Arc::new(HttpTransport::new(server.uri()).unwrap());
        let state = Arc::new(ClientState::new(Credential::from("expired")));
        PasswordReauthenticator::new(transport, state, password)
    }

    #[test]
    fn token_is_read_from_data() {
        let credential = token_from_login_data(&json!({ "token": "abc" })).unwrap();
        assert_eq!(credential, Credential::from("abc"));
    }

    #[test]
    fn missing_or_empty_token_is_rejected() {
        for data in [json!({}), json!({ "token": "" }), json!({ "token": 42 }), Value::Null] {
            let err = token_from_login_data(&data).unwrap_err();
            assert!(matches!(err, CaptainError::Authentication(_)));
        }
    }

    #[tokio::test]
    async fn posts_password_and_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(header("x-namespace", "captain"))
            .and(body_json(json!({ "password": "captain42" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ResponseEnvelope::new(
                ApiStatus::Okay,
                "Login succeeded",
                json!({ "token": "fresh-token" }),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let credential = reauthenticator(&server, "captain42").reauthenticate().await.unwrap();
        assert_eq!(credential, Credential::from("fresh-token"));
    }

    #[tokio::test]
    async fn wrong_password_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ResponseEnvelope::new(
                ApiStatus::WrongPassword,
                "Wrong password",
                Value::Null,
            )))
            .mount(&server)
            .await;

        let err = reauthenticator(&server, "nope").reauthenticate().await.unwrap_err();
        match err {
            CaptainError::Authentication(msg) => assert!(msg.contains("Wrong password")),
            other => panic!("expected authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = reauthenticator(&server, "captain42").reauthenticate().await.unwrap_err();
        assert!(matches!(err, CaptainError::Authentication(_)));
    }
}
