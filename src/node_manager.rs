//! NodeManager API surface.
//!
//! Per-worker-node agent role; exposes node-local application and
//! container introspection under `/ws/v1/node`.

use std::time::Duration;

use serde_json::Value;

use crate::auth::Authenticator;
use crate::client::{ApiClient, ApiRequest, DEFAULT_TIMEOUT_SECS, Response};
use crate::constants::{APPLICATION_STATES, ensure_legal};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::hadoop_conf;

const DEFAULT_NM_PORT: u16 = 8042;

/// Client for the NodeManager REST API.
pub struct NodeManager {
    client: ApiClient,
}

impl NodeManager {
    /// Connects with default configuration: 30 second timeout, no
    /// authentication, TLS verification on. `None` resolves the endpoint
    /// from `yarn.nodemanager.webapp.address`.
    pub async fn new(service_endpoint: Option<&str>) -> Result<Self, Error> {
        Self::with_config(service_endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS), None, true).await
    }

    pub async fn with_config(
        service_endpoint: Option<&str>,
        timeout: Duration,
        auth: Option<Box<dyn Authenticator>>,
        verify: bool,
    ) -> Result<Self, Error> {
        let endpoint = match service_endpoint {
            Some(raw) => Some(Endpoint::parse(raw)?),
            None => hadoop_conf::nodemanager_endpoint(&hadoop_conf::conf_dir())?
                .map(|address| Endpoint::parse(&address).map(|ep| ep.with_default_port(DEFAULT_NM_PORT)))
                .transpose()?,
        };

        Ok(Self {
            client: ApiClient::with_config(endpoint, timeout, auth, verify)?,
        })
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.client.endpoint()
    }

    pub async fn node_information(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/node/info")).await
    }

    pub async fn node_applications(&self, state: Option<&str>, user: Option<&str>) -> Result<Response, Error> {
        if let Some(state) = state {
            ensure_legal("Application state", state, APPLICATION_STATES)?;
        }

        let request = ApiRequest::get("/ws/v1/node/apps")
            .opt_param("state", state)
            .opt_param("user", user);
        self.client.request(request).await
    }

    pub async fn node_application(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/node/apps/{}", application_id)))
            .await
    }

    pub async fn node_containers(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/node/containers")).await
    }

    pub async fn node_container(&self, container_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/node/containers/{}", container_id)))
            .await
    }

    pub async fn auxiliary_services(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/node/auxiliaryservices")).await
    }

    pub async fn auxiliary_services_update(&self, data: Value) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::put("/ws/v1/node/auxiliaryservices").body(data))
            .await
    }
}
