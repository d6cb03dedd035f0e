//! HistoryServer API surface.
//!
//! Serves completed MapReduce job metadata under `/ws/v1/history`.

use std::time::Duration;

use crate::auth::Authenticator;
use crate::client::{ApiClient, ApiRequest, DEFAULT_TIMEOUT_SECS, Response};
use crate::constants::{JOB_STATES_INTERNAL, TASK_TYPES, ensure_legal};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::hadoop_conf;

const DEFAULT_HS_PORT: u16 = 19888;

/// Client for the HistoryServer REST API.
pub struct HistoryServer {
    client: ApiClient,
}

impl HistoryServer {
    /// Connects with default configuration: 30 second timeout, no
    /// authentication, TLS verification on. `None` resolves the endpoint
    /// from `mapreduce.jobhistory.webapp.address`.
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
            None => hadoop_conf::jobhistory_endpoint(&hadoop_conf::conf_dir())?
                .map(|address| Endpoint::parse(&address).map(|ep| ep.with_default_port(DEFAULT_HS_PORT)))
                .transpose()?,
        };

        Ok(Self {
            client: ApiClient::with_config(endpoint, timeout, auth, verify)?,
        })
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.client.endpoint()
    }

    pub async fn application_information(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/history/info")).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn jobs(
        &self,
        state: Option<&str>,
        user: Option<&str>,
        queue: Option<&str>,
        limit: Option<u64>,
        started_time_begin: Option<u64>,
        started_time_end: Option<u64>,
        finished_time_begin: Option<u64>,
        finished_time_end: Option<u64>,
    ) -> Result<Response, Error> {
        if let Some(state) = state {
            ensure_legal("Job state", state, JOB_STATES_INTERNAL)?;
        }

        let request = ApiRequest::get("/ws/v1/history/mapreduce/jobs")
            .opt_param("state", state)
            .opt_param("user", user)
            .opt_param("queue", queue)
            .opt_param("limit", limit)
            .opt_param("startedTimeBegin", started_time_begin)
            .opt_param("startedTimeEnd", started_time_end)
            .opt_param("finishedTimeBegin", finished_time_begin)
            .opt_param("finishedTimeEnd", finished_time_end);

        self.client.request(request).await
    }

    pub async fn job(&self, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/history/mapreduce/jobs/{}", job_id)))
            .await
    }

    pub async fn job_attempts(&self, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/history/mapreduce/jobs/{}/jobattempts", job_id)))
            .await
    }

    pub async fn job_counters(&self, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/history/mapreduce/jobs/{}/counters", job_id)))
            .await
    }

    pub async fn job_conf(&self, job_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/history/mapreduce/jobs/{}/conf", job_id)))
            .await
    }

    pub async fn job_tasks(&self, job_id: &str, task_type: Option<&str>) -> Result<Response, Error> {
        if let Some(task_type) = task_type {
            ensure_legal("Task type", task_type, TASK_TYPES)?;
        }

        let request =
            ApiRequest::get(format!("/ws/v1/history/mapreduce/jobs/{}/tasks", job_id)).opt_param("types", task_type);
        self.client.request(request).await
    }

    pub async fn job_task(&self, job_id: &str, task_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/history/mapreduce/jobs/{}/tasks/{}", job_id, task_id)))
            .await
    }

    pub async fn task_counters(&self, job_id: &str, task_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/history/mapreduce/jobs/{}/tasks/{}/counters",
                job_id, task_id
            )))
            .await
    }

    pub async fn task_attempts(&self, job_id: &str, task_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/history/mapreduce/jobs/{}/tasks/{}/attempts",
                job_id, task_id
            )))
            .await
    }

    pub async fn task_attempt(&self, job_id: &str, task_id: &str, attempt_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/history/mapreduce/jobs/{}/tasks/{}/attempt/{}",
                job_id, task_id, attempt_id
            )))
            .await
    }

    pub async fn task_attempt_counters(
        &self,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/history/mapreduce/jobs/{}/tasks/{}/attempt/{}/counters",
                job_id, task_id, attempt_id
            )))
            .await
    }
}
