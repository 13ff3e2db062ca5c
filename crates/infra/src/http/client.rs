use std::time::Duration;

use async_trait::async_trait;
use captain_core::Transport;
use captain_domain::constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, JSON_MEDIA_TYPE, NAMESPACE, NAMESPACE_HEADER,
    TOKEN_HEADER,
};
use captain_domain::{
    CaptainError, ClientConfig, Credential, FormField, HttpMethod, RequestDescriptor,
    ResponseEnvelope, Result,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, RequestBuilder};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP transport for the management API.
///
/// Sends one request per [`Transport::execute`] call and parses the body as a
/// [`ResponseEnvelope`] whatever the HTTP status. No retries happen here.
#[derive(Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: String,
}

impl HttpTransport {
    /// Start building a new transport for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    /// Convenience constructor with default configuration.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Build a transport from client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::builder(config.base_url.clone())
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
    }

    /// Base URL every endpoint is appended to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn prepare(&self, request: &RequestDescriptor, credential: &Credential) -> Result<RequestBuilder> {
        let url = self.url(request.endpoint());

        let builder = match request.method() {
            HttpMethod::Get => {
                let pairs = request.query_pairs()?;
                let builder = json_headers(self.client.get(&url));
                if pairs.is_empty() {
                    builder
                } else {
                    builder.query(&pairs)
                }
            }
            HttpMethod::PostJson => json_headers(self.client.post(&url)).json(&request.json_body()?),
            HttpMethod::PostMultipart => self.client.post(&url).multipart(build_form(request)?),
        };

        Ok(auth_headers(builder, credential))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        credential: &Credential,
    ) -> Result<ResponseEnvelope> {
        let builder = self.prepare(request, credential)?;
        let method = request.method();
        let endpoint = request.endpoint();

        debug!(%method, endpoint, "sending HTTP request");

        let response = builder.send().await.map_err(InfraError::from)?;
        let status = response.status();
        debug!(%method, endpoint, %status, "received HTTP response");

        let body = response.bytes().await.map_err(InfraError::from)?;

        serde_json::from_slice::<ResponseEnvelope>(&body).map_err(|err| {
            CaptainError::Transport(format!(
                "{method} {endpoint} returned HTTP {status} with a body that is not a response \
                 envelope: {err}"
            ))
        })
    }
}

fn json_headers(builder: RequestBuilder) -> RequestBuilder {
    builder.header(CONTENT_TYPE, JSON_MEDIA_TYPE).header(ACCEPT, JSON_MEDIA_TYPE)
}

fn auth_headers(builder: RequestBuilder, credential: &Credential) -> RequestBuilder {
    let builder = builder.header(NAMESPACE_HEADER, NAMESPACE);
    if credential.is_empty() {
        builder
    } else {
        builder.header(TOKEN_HEADER, credential.as_str())
    }
}

fn build_form(request: &RequestDescriptor) -> Result<Form> {
    let mut form = Form::new();

    for field in request.form_fields() {
        form = match field {
            FormField::Text { name, value } => form.text(name.to_string(), value),
            FormField::File { name, file } => {
                let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                if let Some(content_type) = &file.content_type {
                    part = part.mime_str(content_type).map_err(InfraError::from)?;
                }
                form.part(name.to_string(), part)
            }
        };
    }

    Ok(form)
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl HttpTransportBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// Per-request timeout, covering connect through body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Value of the `User-Agent` header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Returns `CaptainError::InvalidRequest` if reqwest rejects the settings.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(InfraError::from)?;

        Ok(HttpTransport { client, base_url: self.base_url.trim_end_matches('/').to_string() })
    }
}

#[cfg(test)]
mod tests {
    use captain_domain::{ApiStatus, FilePart};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn envelope(status: i64, data: serde_json::Value) -> serde_json::Value {
        json!({ "status": status, "description": "", "data": data })
    }

    #[tokio::test]
    async fn get_sends_query_and_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/apps/appDefinitions/unusedImages"))
            .and(query_param("mostRecentLimit", "3"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(header("x-namespace", "captain"))
            .and(header("x-captain-auth", "t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(100, json!([]))))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let request = RequestDescriptor::get("/user/apps/appDefinitions/unusedImages")
            .with_param("mostRecentLimit", 3_i64);

        let envelope = transport.execute(&request, &Credential::from("t1")).await.unwrap();
        assert_eq!(envelope.api_status(), Some(ApiStatus::Okay));
    }

    #[tokio::test]
    async fn post_json_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/system/forcessl"))
            .and(body_json(json!({ "isEnabled": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(100, json!({}))))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let request =
            RequestDescriptor::post_json("/user/system/forcessl").with_param("isEnabled", true);

        let envelope = transport.execute(&request, &Credential::from("t1")).await.unwrap();
        assert_eq!(envelope.data, json!({}));
    }

    #[tokio::test]
    async fn empty_credential_omits_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(100, json!(null))))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        transport.execute(&RequestDescriptor::get("/x"), &Credential::empty()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("x-captain-auth").is_none());
        assert_eq!(requests[0].headers.get("x-namespace").unwrap(), "captain");
    }

    #[tokio::test]
    async fn multipart_sends_file_and_scalar_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/apps/appData/web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(101, json!(null))))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let request = RequestDescriptor::post_multipart("/user/apps/appData/web?detached=1")
            .with_param("sourceFile", FilePart::new("deploy.tar", b"TARBALL-BYTES".to_vec()))
            .with_param("gitHash", "3f2a9c1");

        let envelope = transport.execute(&request, &Credential::from("t1")).await.unwrap();
        assert_eq!(envelope.api_status(), Some(ApiStatus::OkayBuildStarted));

        let requests = server.received_requests().await.unwrap();
        let received = &requests[0];
        assert_eq!(received.url.query(), Some("detached=1"));

        let content_type = received.headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
        assert!(!content_type.contains("application/json"));

        let body = String::from_utf8_lossy(&received.body);
        assert!(body.contains(r#"name="sourceFile"; filename="deploy.tar""#));
        assert!(body.contains("TARBALL-BYTES"));
        assert!(body.contains(r#"name="gitHash""#));
        assert!(body.contains("3f2a9c1"));
    }

    #[tokio::test]
    async fn non_envelope_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let err = transport
            .execute(&RequestDescriptor::get("/x"), &Credential::empty())
            .await
            .unwrap_err();

        match err {
            CaptainError::Transport(msg) => assert!(msg.contains("502")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn envelope_is_parsed_regardless_of_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(envelope(1106, json!(null))))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let envelope = transport
            .execute(&RequestDescriptor::get("/x"), &Credential::from("old"))
            .await
            .unwrap();

        assert!(envelope.is_auth_token_invalid());
    }

    #[tokio::test]
    async fn file_param_in_get_is_rejected_before_sending() {
        let server = MockServer::start().await;
        let transport = HttpTransport::new(server.uri()).unwrap();
        let request = RequestDescriptor::get("/x").with_param("f", FilePart::new("a", vec![1]));

        let err = transport.execute(&request, &Credential::empty()).await.unwrap_err();

        assert!(matches!(err, CaptainError::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("http://localhost:3000/api/v2/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:3000/api/v2");
        assert_eq!(transport.url("/login"), "http://localhost:3000/api/v2/login");
    }
}
