//! Conversions from external infrastructure errors into domain errors.

use captain_domain::CaptainError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CaptainError);

impl From<InfraError> for CaptainError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CaptainError> for InfraError {
    fn from(value: CaptainError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCaptainError {
    fn into_captain(self) -> CaptainError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CaptainError */
/* -------------------------------------------------------------------------- */

impl IntoCaptainError for HttpError {
    fn into_captain(self) -> CaptainError {
        if self.is_timeout() {
            return CaptainError::Transport("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return CaptainError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return CaptainError::InvalidRequest(format!("could not build HTTP request: {self}"));
        }

        if self.is_decode() {
            return CaptainError::Transport(format!("response is not a valid envelope: {self}"));
        }

        if let Some(status) = self.status() {
            return CaptainError::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        CaptainError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_captain())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn connection_refused_maps_to_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: CaptainError = InfraError::from(error).into();
        match mapped {
            CaptainError::Transport(msg) => assert!(msg.to_lowercase().contains("connection")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_error_maps_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::BAD_GATEWAY))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error =
            client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: CaptainError = InfraError::from(error).into();
        match mapped {
            CaptainError::Transport(msg) => assert!(msg.contains("502")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_body_maps_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client
            .get(server.uri())
            .send()
            .await
            .unwrap()
            .json::<serde_json::Value>()
            .await
            .unwrap_err();

        let mapped: CaptainError = InfraError::from(error).into();
        assert!(matches!(mapped, CaptainError::Transport(_)));
    }
}
