//! ResourceManager API surface.
//!
//! The ResourceManager is the cluster-wide scheduler; this surface covers
//! the `/ws/v1/cluster` resource tree: applications, nodes, queues,
//! reservations, delegation tokens, and scheduler configuration.
//!
//! Construction takes a list of candidate endpoints because the RM is the
//! one role that runs in High-Availability pairs: each candidate is
//! probed in order and the surface binds to the first active one. With no
//! explicit candidates the list is derived from the cluster
//! configuration's `yarn.resourcemanager.ha.rm-ids`.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use serde_json::{Value, json};

use crate::auth::Authenticator;
use crate::client::{ApiClient, ApiRequest, DEFAULT_TIMEOUT_SECS, Response};
use crate::constants::{
    CONTAINER_SIGNAL_COMMANDS, FINAL_APPLICATION_STATUSES, NODE_STATES, YARN_APPLICATION_STATES, ensure_legal,
};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::hadoop_conf;

const DEFAULT_RM_PORT: u16 = 8088;

const DELEGATION_TOKEN_HEADER: &str = "Hadoop-YARN-RM-Delegation-Token";

/// Client for the ResourceManager REST API.
pub struct ResourceManager {
    client: ApiClient,
}

impl ResourceManager {
    /// Connects with default configuration: 30 second timeout, no
    /// authentication, TLS verification on.
    ///
    /// `service_endpoints` are the HA candidates to probe; `None` derives
    /// them from the Hadoop configuration directory.
    pub async fn new(service_endpoints: Option<Vec<String>>) -> Result<Self, Error> {
        Self::with_config(service_endpoints, Duration::from_secs(DEFAULT_TIMEOUT_SECS), None, true).await
    }

    pub async fn with_config(
        service_endpoints: Option<Vec<String>>,
        timeout: Duration,
        auth: Option<Box<dyn Authenticator>>,
        verify: bool,
    ) -> Result<Self, Error> {
        let endpoint = Self::resolve_endpoint(service_endpoints, timeout, auth.as_deref(), verify).await?;
        Ok(Self {
            client: ApiClient::with_config(endpoint, timeout, auth, verify)?,
        })
    }

    /// The endpoint the surface is bound to, when one was resolved.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.client.endpoint()
    }

    async fn resolve_endpoint(
        service_endpoints: Option<Vec<String>>,
        timeout: Duration,
        auth: Option<&dyn Authenticator>,
        verify: bool,
    ) -> Result<Option<Endpoint>, Error> {
        let candidates: Vec<Endpoint> = match service_endpoints {
            Some(raw) => raw.iter().map(|s| Endpoint::parse(s)).collect::<Result<_, _>>()?,
            None => {
                let dir = hadoop_conf::conf_dir();
                debug!(dir:% = dir.display(); "Resolving resource manager from hadoop configuration");

                match hadoop_conf::rm_ids(&dir)? {
                    Some(ids) => {
                        let https = hadoop_conf::is_https_only(&dir)?;
                        let mut candidates = Vec::with_capacity(ids.len());
                        for id in &ids {
                            if let Some(address) = hadoop_conf::resource_manager_endpoint(&dir, Some(id))? {
                                candidates.push(configured_endpoint(&address, https)?);
                            }
                        }
                        candidates
                    },
                    None => {
                        // Non-HA cluster: single static key, no probing.
                        return match hadoop_conf::resource_manager_endpoint(&dir, None)? {
                            Some(address) => {
                                let https = hadoop_conf::is_https_only(&dir)?;
                                Ok(Some(configured_endpoint(&address, https)?))
                            },
                            None => Ok(None),
                        };
                    },
                }
            },
        };

        for candidate in &candidates {
            if hadoop_conf::check_is_active_rm(&candidate.to_url(""), timeout, auth, verify).await {
                info!(endpoint:% = candidate; "Bound to active resource manager");
                return Ok(Some(candidate.clone()));
            }
        }

        Err(Error::Configuration(
            "No active ResourceManager found among candidate endpoints".into(),
        ))
    }

    pub async fn cluster_information(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/cluster/info")).await
    }

    pub async fn cluster_metrics(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/cluster/metrics")).await
    }

    pub async fn cluster_scheduler(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/cluster/scheduler")).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn cluster_applications(
        &self,
        state: Option<&str>,
        states: Option<&[&str]>,
        final_status: Option<&str>,
        user: Option<&str>,
        queue: Option<&str>,
        limit: Option<u64>,
        started_time_begin: Option<u64>,
        started_time_end: Option<u64>,
        finished_time_begin: Option<u64>,
        finished_time_end: Option<u64>,
        application_types: Option<&[&str]>,
        application_tags: Option<&[&str]>,
        de_selects: Option<&[&str]>,
    ) -> Result<Response, Error> {
        if let Some(state) = state {
            ensure_legal("Yarn application state", state, YARN_APPLICATION_STATES)?;
        }
        if let Some(states) = states {
            for state in states {
                ensure_legal("Yarn application state", state, YARN_APPLICATION_STATES)?;
            }
        }
        if let Some(final_status) = final_status {
            ensure_legal("Final application status", final_status, FINAL_APPLICATION_STATUSES)?;
        }

        let request = ApiRequest::get("/ws/v1/cluster/apps")
            .opt_param("state", state)
            .opt_param("states", states.map(|s| s.join(",")))
            .opt_param("finalStatus", final_status)
            .opt_param("user", user)
            .opt_param("queue", queue)
            .opt_param("limit", limit)
            .opt_param("startedTimeBegin", started_time_begin)
            .opt_param("startedTimeEnd", started_time_end)
            .opt_param("finishedTimeBegin", finished_time_begin)
            .opt_param("finishedTimeEnd", finished_time_end)
            .opt_param("applicationTypes", application_types.map(|s| s.join(",")))
            .opt_param("applicationTags", application_tags.map(|s| s.join(",")))
            .opt_param("deSelects", de_selects.map(|s| s.join(",")));

        self.client.request(request).await
    }

    pub async fn cluster_application_statistics(
        &self,
        state_list: Option<&[&str]>,
        application_type_list: Option<&[&str]>,
    ) -> Result<Response, Error> {
        if let Some(states) = state_list {
            for state in states {
                ensure_legal("Yarn application state", state, YARN_APPLICATION_STATES)?;
            }
        }

        let request = ApiRequest::get("/ws/v1/cluster/appstatistics")
            .opt_param("states", state_list.map(|s| s.join(",")))
            .opt_param("applicationTypes", application_type_list.map(|s| s.join(",")));

        self.client.request(request).await
    }

    pub async fn cluster_application(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/cluster/apps/{}", application_id)))
            .await
    }

    pub async fn cluster_application_attempts(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/cluster/apps/{}/appattempts", application_id)))
            .await
    }

    pub async fn cluster_application_attempt_info(
        &self,
        application_id: &str,
        attempt_id: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/cluster/apps/{}/appattempts/{}",
                application_id, attempt_id
            )))
            .await
    }

    pub async fn cluster_application_attempt_containers(
        &self,
        application_id: &str,
        attempt_id: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/cluster/apps/{}/appattempts/{}/containers",
                application_id, attempt_id
            )))
            .await
    }

    pub async fn cluster_application_attempt_container_info(
        &self,
        application_id: &str,
        attempt_id: &str,
        container_id: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/cluster/apps/{}/appattempts/{}/containers/{}",
                application_id, attempt_id, container_id
            )))
            .await
    }

    pub async fn cluster_application_state(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/cluster/apps/{}/state", application_id)))
            .await
    }

    /// Asks the ResourceManager to kill the application.
    pub async fn cluster_application_kill(&self, application_id: &str) -> Result<Response, Error> {
        let request = ApiRequest::put(format!("/ws/v1/cluster/apps/{}/state", application_id))
            .body(json!({"state": "KILLED"}));
        self.client.request(request).await
    }

    pub async fn cluster_nodes(&self, states: Option<&[&str]>) -> Result<Response, Error> {
        if let Some(states) = states {
            for state in states {
                ensure_legal("Node state", state, NODE_STATES)?;
            }
        }

        let request = ApiRequest::get("/ws/v1/cluster/nodes").opt_param("states", states.map(|s| s.join(",")));
        self.client.request(request).await
    }

    pub async fn cluster_node(&self, node_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/cluster/nodes/{}", node_id)))
            .await
    }

    pub async fn cluster_node_update_resource(&self, node_id: &str, resource: Value) -> Result<Response, Error> {
        let request = ApiRequest::post(format!("/ws/v1/cluster/nodes/{}/resource", node_id)).body(resource);
        self.client.request(request).await
    }

    /// Reserves a new application id for a later submit.
    pub async fn cluster_new_application(&self) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::post("/ws/v1/cluster/apps/new-application"))
            .await
    }

    pub async fn cluster_submit_application(&self, data: Value) -> Result<Response, Error> {
        self.client.request(ApiRequest::post("/ws/v1/cluster/apps").body(data)).await
    }

    pub async fn cluster_get_application_queue(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/cluster/apps/{}/queue", application_id)))
            .await
    }

    pub async fn cluster_change_application_queue(&self, application_id: &str, queue: &str) -> Result<Response, Error> {
        let request =
            ApiRequest::put(format!("/ws/v1/cluster/apps/{}/queue", application_id)).body(json!({"queue": queue}));
        self.client.request(request).await
    }

    pub async fn cluster_get_application_priority(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/cluster/apps/{}/priority", application_id)))
            .await
    }

    pub async fn cluster_change_application_priority(
        &self,
        application_id: &str,
        priority: i64,
    ) -> Result<Response, Error> {
        let request = ApiRequest::put(format!("/ws/v1/cluster/apps/{}/priority", application_id))
            .body(json!({"priority": priority}));
        self.client.request(request).await
    }

    /// Container memory available on nodes, read from the local Hadoop
    /// configuration. No network call.
    pub fn cluster_node_container_memory(&self) -> Result<Option<u64>, Error> {
        hadoop_conf::container_memory_mb(&hadoop_conf::conf_dir())
    }

    /// Finds a queue by name in an already-fetched scheduler document,
    /// searching the nested `queues`/`queue` tree breadth-first.
    pub fn cluster_scheduler_queue<'a>(scheduler_data: &'a Value, queue_name: &str) -> Option<&'a Value> {
        let root = &scheduler_data["scheduler"]["schedulerInfo"];
        let mut pending = VecDeque::from([root]);

        while let Some(node) = pending.pop_front() {
            if node["queueName"].as_str() == Some(queue_name) {
                return Some(node);
            }
            if let Some(children) = node["queues"]["queue"].as_array() {
                pending.extend(children.iter());
            }
        }

        None
    }

    /// Whether a queue partition still has capacity under `threshold`
    /// percent absolute usage.
    pub fn cluster_scheduler_queue_availability(queue_partition: &Value, availability_threshold: f64) -> bool {
        queue_partition
            .get("absoluteUsedCapacity")
            .and_then(Value::as_f64)
            .map(|used| used < availability_threshold)
            .unwrap_or(false)
    }

    /// Finds one partition of a queue document by partition name.
    pub fn cluster_queue_partition<'a>(queue: &'a Value, partition_name: &str) -> Option<&'a Value> {
        queue["capacities"]["queueCapacitiesByPartition"]
            .as_array()?
            .iter()
            .find(|partition| partition["partitionName"].as_str() == Some(partition_name))
    }

    pub async fn cluster_reservations(
        &self,
        queue: Option<&str>,
        reservation_id: Option<&str>,
        start_time: Option<u64>,
        end_time: Option<u64>,
        include_resource_allocations: Option<bool>,
    ) -> Result<Response, Error> {
        let request = ApiRequest::get("/ws/v1/cluster/reservation/list")
            .opt_param("queue", queue)
            .opt_param("reservation-id", reservation_id)
            .opt_param("start-time", start_time)
            .opt_param("end-time", end_time)
            .opt_param("include-resource-allocations", include_resource_allocations);
        self.client.request(request).await
    }

    pub async fn cluster_new_reservation(&self) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::post("/ws/v1/cluster/reservation/new-reservation"))
            .await
    }

    pub async fn cluster_submit_reservation(&self, data: Value) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::post("/ws/v1/cluster/reservation/submit").body(data))
            .await
    }

    pub async fn cluster_update_reservation(&self, data: Value) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::post("/ws/v1/cluster/reservation/update").body(data))
            .await
    }

    pub async fn cluster_delete_reservation(&self, reservation_id: &str) -> Result<Response, Error> {
        let request = ApiRequest::post("/ws/v1/cluster/reservation/delete")
            .body(json!({"reservation-id": reservation_id}));
        self.client.request(request).await
    }

    pub async fn cluster_new_delegation_token(&self, renewer: &str) -> Result<Response, Error> {
        let request = ApiRequest::post("/ws/v1/cluster/delegation-token").body(json!({"renewer": renewer}));
        self.client.request(request).await
    }

    pub async fn cluster_renew_delegation_token(&self, delegation_token: &str) -> Result<Response, Error> {
        let request = ApiRequest::post("/ws/v1/cluster/delegation-token/expiration")
            .header(DELEGATION_TOKEN_HEADER, delegation_token);
        self.client.request(request).await
    }

    pub async fn cluster_cancel_delegation_token(&self, delegation_token: &str) -> Result<Response, Error> {
        let request =
            ApiRequest::delete("/ws/v1/cluster/delegation-token").header(DELEGATION_TOKEN_HEADER, delegation_token);
        self.client.request(request).await
    }

    pub async fn cluster_application_timeouts(&self, application_id: &str) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!("/ws/v1/cluster/apps/{}/timeouts", application_id)))
            .await
    }

    pub async fn cluster_application_timeout(
        &self,
        application_id: &str,
        timeout_type: &str,
    ) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::get(format!(
                "/ws/v1/cluster/apps/{}/timeouts/{}",
                application_id, timeout_type
            )))
            .await
    }

    pub async fn cluster_update_application_timeout(
        &self,
        application_id: &str,
        timeout_type: &str,
        expiry_time: &str,
    ) -> Result<Response, Error> {
        let request = ApiRequest::put(format!("/ws/v1/cluster/apps/{}/timeout", application_id))
            .body(json!({"timeout": {"type": timeout_type, "expiryTime": expiry_time}}));
        self.client.request(request).await
    }

    pub async fn cluster_scheduler_conf_mutation(&self) -> Result<Response, Error> {
        self.client.request(ApiRequest::get("/ws/v1/cluster/scheduler-conf")).await
    }

    pub async fn cluster_modify_scheduler_conf_mutation(&self, data: Value) -> Result<Response, Error> {
        self.client
            .request(ApiRequest::put("/ws/v1/cluster/scheduler-conf").body(data))
            .await
    }

    pub async fn cluster_container_signal(&self, container_id: &str, command: &str) -> Result<Response, Error> {
        ensure_legal("Container signal command", command, CONTAINER_SIGNAL_COMMANDS)?;
        self.client
            .request(ApiRequest::post(format!(
                "/ws/v1/cluster/containers/{}/signal/{}",
                container_id, command
            )))
            .await
    }

    pub async fn scheduler_activities(&self, node_id: Option<&str>) -> Result<Response, Error> {
        let request = ApiRequest::get("/ws/v1/cluster/scheduler/activities").opt_param("nodeId", node_id);
        self.client.request(request).await
    }

    pub async fn application_activities(
        &self,
        application_id: &str,
        max_time: Option<u64>,
    ) -> Result<Response, Error> {
        let request = ApiRequest::get(format!("/ws/v1/cluster/scheduler/app-activities/{}", application_id))
            .opt_param("maxTime", max_time);
        self.client.request(request).await
    }
}

/// Normalizes an address read from cluster configuration: HTTPS-prefixed
/// under an HTTPS-only policy, default webapp port filled in when absent.
fn configured_endpoint(address: &str, https: bool) -> Result<Endpoint, Error> {
    let raw = if https && !address.contains("://") {
        format!("https://{}", address)
    } else {
        address.to_string()
    };
    Ok(Endpoint::parse(&raw)?.with_default_port(DEFAULT_RM_PORT))
}
