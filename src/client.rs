//! The request engine shared by every API surface.
//!
//! An [`ApiRequest`] describes one REST call (path, method, query
//! parameters, optional JSON body, extra headers) and is consumed by
//! [`ApiClient::request`], which issues the HTTP exchange and interprets
//! the result into a [`Response`] or an [`Error`]. The engine is
//! stateless per call; the only cross-call state is the persistent
//! `reqwest` connection pool and the authenticator's cached token.

use std::time::Duration;

use log::debug;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::auth::Authenticator;
use crate::endpoint::Endpoint;
use crate::error::Error;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One REST call, built by a surface method and consumed by the engine.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) path: String,
    pub(crate) method: Method,
    pub(crate) params: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) headers: Vec<(String, String)>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            params: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Attaches the parameter only when a value is present; `None`
    /// optionals are omitted from the query string entirely.
    pub fn opt_param(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A successful API response, wrapping the parsed JSON body.
///
/// An empty body parses to an empty JSON object, never a decode failure.
#[derive(Debug, Clone)]
pub struct Response {
    pub data: Value,
}

/// Issues [`ApiRequest`]s against one endpoint.
///
/// Built once per API surface; the inner `reqwest::Client` carries the
/// surface's timeout and TLS-verification policy and reuses connections
/// across calls.
pub struct ApiClient {
    endpoint: Option<Endpoint>,
    client: reqwest::Client,
    auth: Option<Box<dyn Authenticator>>,
}

impl ApiClient {
    /// Creates an engine with the default 30 second timeout, no
    /// authenticator, and TLS verification on.
    pub fn new(endpoint: Option<Endpoint>) -> Result<Self, Error> {
        Self::with_config(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS), None, true)
    }

    pub fn with_config(
        endpoint: Option<Endpoint>,
        timeout: Duration,
        auth: Option<Box<dyn Authenticator>>,
        verify: bool,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify)
            .build()?;

        Ok(Self { endpoint, client, auth })
    }

    /// The endpoint this engine is bound to, if one was resolved.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Executes one request and interprets the result.
    ///
    /// Success is a 200 or 202 status; any other status becomes
    /// [`Error::Api`] carrying the body verbatim. Transport failures
    /// propagate untouched and are never retried.
    pub async fn request(&self, request: ApiRequest) -> Result<Response, Error> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or_else(|| Error::Configuration("API endpoint is not set".into()))?;

        let url = endpoint.to_url(&request.path);
        debug!(method:% = request.method, url = url.as_str(); "API endpoint");

        // Mutating methods default to a JSON content type; caller-supplied
        // headers overwrite on conflicting names.
        let mut headers = HeaderMap::new();
        if request.method != Method::GET {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Configuration(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        let mut builder = self.client.request(request.method.clone(), url).headers(headers);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_string(body)?);
        }
        if let Some(auth) = &self.auth {
            builder = auth.decorate(&self.client, builder).await?;
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !matches!(status.as_u16(), 200 | 202) {
            return Err(Error::Api { status, body: text });
        }

        let data = if text.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&text)?
        };

        Ok(Response { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApiClient {
        let endpoint = Endpoint::parse(&server.uri()).unwrap();
        ApiClient::new(Some(endpoint)).unwrap()
    }

    #[tokio::test]
    async fn success_response_parses_json_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/v1/cluster/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.request(ApiRequest::get("/ws/v1/cluster/info")).await.unwrap();
        assert_eq!(response.data, json!({"status": "success"}));
    }

    #[tokio::test]
    async fn accepted_202_is_a_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ws/v1/cluster/apps"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .request(ApiRequest::post("/ws/v1/cluster/apps").body(json!({"application-id": "app_1"})))
            .await
            .unwrap();
        assert_eq!(response.data, json!({}));
    }

    #[tokio::test]
    async fn non_success_status_carries_body_verbatim() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such app"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.request(ApiRequest::get("/ws/v1/cluster/apps/x")).await.unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, "no such app");
            },
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_body_yields_empty_object() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.request(ApiRequest::get("/ws/v1/cluster/info")).await.unwrap();
        assert_eq!(response.data, json!({}));
    }

    #[tokio::test]
    async fn missing_endpoint_fails_before_any_io() {
        let client = ApiClient::new(None).unwrap();
        let err = client.request(ApiRequest::get("/ws/v1/cluster/info")).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn get_requests_carry_no_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client.request(ApiRequest::get("/ws/v1/cluster/info")).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn mutating_requests_default_to_json_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"state":"KILLED"}"#))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client
            .request(ApiRequest::put("/ws/v1/cluster/apps/a/state").body(json!({"state": "KILLED"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(header("Content-Type", "text/plain"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client
            .request(ApiRequest::put("/ws/v1/cluster/apps/a/state").header("Content-Type", "text/plain"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn query_parameters_attach_in_insertion_order() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("states", "NEW"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client
            .request(
                ApiRequest::get("/ws/v1/cluster/nodes")
                    .param("states", "NEW")
                    .opt_param("limit", Some(5))
                    .opt_param("user", None::<String>),
            )
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("states=NEW&limit=5"));
    }
}
