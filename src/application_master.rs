//! ApplicationMaster API surface.
//!
//! Running applications are reached through the cluster web proxy at
//! `/proxy/{application_id}/ws/v1/mapreduce`, so every method takes the
//! application id as its first parameter.

use std::time::Duration;

use serde_json::json;

use crate::auth::Authenticator;
use crate::client::{ApiClient, ApiRequest, DEFAULT_TIMEOUT_SECS, Response};
use crate::constants::{TASK_TYPES, ensure_legal};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::hadoop_conf;

const DEFAULT_PROXY_PORT: u16 = 8088;

/// Client for the ApplicationMaster REST API, reached via the web proxy.
pub struct ApplicationMaster {
    client: ApiClient,
}

impl ApplicationMaster {
    /// Connects with default configuration: 30 second timeout, no
    /// authentication, TLS verification on. `None` resolves the endpoint
    /// from `yarn.web-proxy.address`, falling back to the
    /// ResourceManager address when the proxy has none of its own.
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
            None => hadoop_conf::webproxy_endpoint(&hadoop_conf::conf_dir())?
                .map(|address| Endpoint::parse(&address).map(|ep| ep.with_default_port(DEFAULT_PROXY_PORT)))
                .transpose()?,
        };

        Ok(Self {
            client: ApiClient::with_config(endpoint, timeout, auth, verify)?,
        })
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.client.endpoint()
    }

    pub async fn application_information(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/proxy/{}/ws/v1/mapreduce/info", application_id)))
            .await
    }

    pub async fn jobs(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/proxy/{}/ws/v1/mapreduce/jobs", application_id)))
            .await
    }

    pub async fn job(&self, application_id: &str, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/proxy/{}/ws/v1/mapreduce/jobs/{}", application_id, job_id)))
            .await
    }

    pub async fn job_attempts(&self, application_id: &str, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/jobattempts",
                application_id, job_id
            )))
            .await
    }

    pub async fn job_counters(&self, application_id: &str, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/counters",
                application_id, job_id
            )))
            .await
    }

    pub async fn job_conf(&self, application_id: &str, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/conf",
                application_id, job_id
            )))
            .await
    }

    pub async fn job_tasks(
        &self,
        application_id: &str,
        job_id: &str,
        task_type: Option<&str>,
    ) -> Result<Response, Error> {
        if let Some(task_type) = task_type {
            ensure_legal("Task type", task_type, TASK_TYPES)?;
        }

        let request = ApiRequest::get(format!("/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks", application_id, job_id))
            .opt_param("types", task_type);
        self.client.request(request).await
    }

    pub async fn job_task(&self, application_id: &str, job_id: &str, task_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks/{}",
                application_id, job_id, task_id
            )))
            .await
    }

    pub async fn task_counters(&self, application_id: &str, job_id: &str, task_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks/{}/counters",
                application_id, job_id, task_id
            )))
            .await
    }

    pub async fn task_attempts(&self, application_id: &str, job_id: &str, task_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks/{}/attempts",
                application_id, job_id, task_id
            )))
            .await
    }

    pub async fn task_attempt(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks/{}/attempt/{}",
                application_id, job_id, task_id, attempt_id
            )))
            .await
    }

    pub async fn task_attempt_counters(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks/{}/attempt/{}/counters",
                application_id, job_id, task_id, attempt_id
            )))
            .await
    }

    pub async fn task_attempt_state(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks/{}/attempts/{}/state",
                application_id, job_id, task_id, attempt_id
            )))
            .await
    }

    /// Asks the ApplicationMaster to kill one running task attempt.
    pub async fn task_attempt_state_kill(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response, Error> {
        let request = ApiRequest::put(format!(
            "/proxy/{}/ws/v1/mapreduce/jobs/{}/tasks/{}/attempts/{}/state",
            application_id, job_id, task_id, attempt_id
        ))
        .body(json!({"state": "KILLED"}));
        self.client.request(request).await
    }
}
