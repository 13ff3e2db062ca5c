use std::sync::Arc;

use captain_core::{ClientState, Reauthenticator, RequestOrchestrator, Transport};
use captain_domain::{
    CaptainError, ClientConfig, Credential, DestroyPolicy, HttpMethod, ParamValue,
    RequestDescriptor, Result,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::auth::{login_request, token_from_login_data, PasswordReauthenticator};
use crate::http::HttpTransport;

/// Client for the Captain management API.
///
/// Every call runs through the auth-retry orchestrator: a rejected token is
/// refreshed with the configured password and the call is retried once.
/// Calls made concurrently share the same credential and destroyed flag.
pub struct CaptainClient {
    orchestrator: RequestOrchestrator,
    config: ClientConfig,
}

impl CaptainClient {
    /// Start building a new client for `config`.
    pub fn builder(config: ClientConfig) -> CaptainClientBuilder {
        CaptainClientBuilder::new(config)
    }

    /// Convenience constructor with no initial credential.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Construct a client that starts with an existing token.
    pub fn with_credential(config: ClientConfig, credential: Credential) -> Result<Self> {
        Self::builder(config).credential(credential).build()
    }

    /// Configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// State shared by every call issued from this client.
    pub fn state(&self) -> &Arc<ClientState> {
        self.orchestrator.state()
    }

    /// How calls behave once the client is destroyed.
    pub fn destroy_policy(&self) -> DestroyPolicy {
        self.orchestrator.destroy_policy()
    }

    /// Issue one API call and return the envelope's `data` on success.
    ///
    /// # Errors
    /// See [`RequestOrchestrator::orchestrate`].
    pub async fn issue_request(&self, request: &RequestDescriptor) -> Result<Value> {
        self.orchestrator.orchestrate(request).await
    }

    /// Issue a call built from a method, an endpoint and a JSON object of
    /// parameters.
    pub async fn issue(&self, method: HttpMethod, endpoint: &str, params: Value) -> Result<Value> {
        let request = RequestDescriptor::new(method, endpoint).with_json_params(params)?;
        self.issue_request(&request).await
    }

    /// GET `endpoint` with `params` as the query string.
    pub async fn get(&self, endpoint: &str, params: Value) -> Result<Value> {
        self.issue(HttpMethod::Get, endpoint, params).await
    }

    /// POST `params` to `endpoint` as a JSON body.
    pub async fn post_json(&self, endpoint: &str, params: Value) -> Result<Value> {
        self.issue(HttpMethod::PostJson, endpoint, params).await
    }

    /// Upload files and scalar fields as `multipart/form-data`.
    pub async fn post_multipart<I, K>(&self, endpoint: &str, params: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, ParamValue)>,
        K: Into<String>,
    {
        let request = params
            .into_iter()
            .fold(RequestDescriptor::post_multipart(endpoint), |request, (name, value)| {
                request.with_param(name, value)
            });
        self.issue_request(&request).await
    }

    /// Generic entry point taking a textual method.
    ///
    /// `"GET"` sends the parameters as a query string, `"POST"` as a JSON
    /// body. The method is matched case-insensitively.
    ///
    /// # Errors
    /// Returns `CaptainError::InvalidRequest` for any other method.
    pub async fn call_api(&self, path: &str, method: &str, params: Value) -> Result<Value> {
        let method = match method.trim().to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::PostJson,
            other => {
                return Err(CaptainError::InvalidRequest(format!(
                    "Unsupported method '{other}': expected GET or POST"
                )))
            }
        };
        self.issue(method, path, params).await
    }

    /// Log in with `password` and store the returned token.
    ///
    /// # Errors
    /// Returns `CaptainError::Authentication` if the response carries no
    /// token, or the orchestrator's error if the login call fails.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str) -> Result<Credential> {
        let data = self.issue_request(&login_request(password)).await?;
        let credential = token_from_login_data(&data)?;

        self.set_credential(credential.clone());
        info!("Logged in");
        Ok(credential)
    }

    /// Snapshot of the current credential.
    pub fn credential(&self) -> Credential {
        self.state().credential()
    }

    /// Replace the credential used by calls that start from now on.
    pub fn set_credential(&self, credential: impl Into<Credential>) {
        self.state().set_credential(credential.into());
    }

    /// True when a non-empty credential is stored.
    pub fn is_logged_in(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Mark the client destroyed. Calls still in flight are handled per the
    /// configured [`DestroyPolicy`].
    pub fn destroy(&self) {
        self.state().destroy();
    }

    /// True once [`CaptainClient::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.state().is_destroyed()
    }
}

/// Builder for [`CaptainClient`].
pub struct CaptainClientBuilder {
    config: ClientConfig,
    credential: Credential,
    transport: Option<Arc<dyn Transport>>,
    reauthenticator: Option<Arc<dyn Reauthenticator>>,
}

impl CaptainClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self { config, credential: Credential::empty(), transport: None, reauthenticator: None }
    }

    /// Token the client starts with. Defaults to none.
    pub fn credential(mut self, credential: impl Into<Credential>) -> Self {
        self.credential = credential.into();
        self
    }

    /// Replace the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the password login used to refresh rejected tokens.
    pub fn reauthenticator(mut self, reauthenticator: Arc<dyn Reauthenticator>) -> Self {
        self.reauthenticator = Some(reauthenticator);
        self
    }

    /// # Errors
    /// Returns `CaptainError::Config` if the configuration is invalid.
    pub fn build(self) -> Result<CaptainClient> {
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::from_config(&self.config)?),
        };
        let state = Arc::new(ClientState::new(self.credential));
        let reauthenticator: Arc<dyn Reauthenticator> = match self.reauthenticator {
            Some(reauthenticator) => reauthenticator,
            None => Arc::new(PasswordReauthenticator::new(
                Arc::clone(&transport),
                Arc::clone(&state),
                self.config.password.clone(),
            )),
        };

        let orchestrator = RequestOrchestrator::new(transport, reauthenticator, state)
            .with_destroy_policy(self.config.on_destroy)
            .with_simulated_latency(self.config.simulated_latency());

        Ok(CaptainClient { orchestrator, config: self.config })
    }
}
