//! Hadoop configuration lookups and the ResourceManager health probe.
//!
//! Endpoints that are not supplied explicitly are resolved from the
//! Hadoop-style XML files under the configuration directory
//! (`$HADOOP_CONF_DIR`, default `/etc/hadoop/conf`). Files are re-read on
//! every resolution attempt so operators can edit cluster configuration
//! without restarting clients. A missing file or key is "no value"; a
//! present-but-unparsable file is a fatal configuration error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};

use crate::auth::Authenticator;
use crate::error::Error;

/// Environment variable overriding the configuration directory.
pub const CONF_DIR_ENV: &str = "HADOOP_CONF_DIR";

/// Default configuration directory on cluster nodes.
pub const DEFAULT_CONF_DIR: &str = "/etc/hadoop/conf";

const YARN_SITE: &str = "yarn-site.xml";
const MAPRED_SITE: &str = "mapred-site.xml";

/// Returns the active configuration directory.
pub fn conf_dir() -> PathBuf {
    std::env::var(CONF_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONF_DIR))
}

/// Looks up a property value in a Hadoop XML configuration file.
///
/// The file layout is `<configuration>` with repeated
/// `<property><name>K</name><value>V</value></property>` children.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when the file exists but cannot be
/// read or parsed as XML; a missing file or key yields `Ok(None)`.
pub fn parse(config_path: &Path, key: &str) -> Result<Option<String>, Error> {
    if !config_path.exists() {
        debug!(path:% = config_path.display(); "Configuration file not present");
        return Ok(None);
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| {
        Error::Configuration(format!("Cannot read {}: {}", config_path.display(), e))
    })?;

    let doc = roxmltree::Document::parse(&content).map_err(|e| {
        Error::Configuration(format!("Malformed XML in {}: {}", config_path.display(), e))
    })?;

    for property in doc
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("property"))
    {
        let name = property
            .children()
            .find(|node| node.has_tag_name("name"))
            .and_then(|node| node.text());

        if name == Some(key) {
            return Ok(property
                .children()
                .find(|node| node.has_tag_name("value"))
                .and_then(|node| node.text())
                .map(str::to_string));
        }
    }

    Ok(None)
}

/// Whether the cluster serves its web UIs over HTTPS only
/// (`yarn.http.policy` set to `HTTPS_ONLY`).
pub fn is_https_only(conf_dir: &Path) -> Result<bool, Error> {
    let policy = parse(&conf_dir.join(YARN_SITE), "yarn.http.policy")?;
    Ok(policy.as_deref() == Some("HTTPS_ONLY"))
}

/// The ResourceManager webapp address, optionally scoped to one HA rm-id.
///
/// Under an `HTTPS_ONLY` policy the `.https.` property variant is read
/// instead of the plain one.
pub fn resource_manager_endpoint(conf_dir: &Path, rm_id: Option<&str>) -> Result<Option<String>, Error> {
    let base = if is_https_only(conf_dir)? {
        "yarn.resourcemanager.webapp.https.address"
    } else {
        "yarn.resourcemanager.webapp.address"
    };

    let property = match rm_id {
        Some(id) => format!("{}.{}", base, id),
        None => base.to_string(),
    };

    parse(&conf_dir.join(YARN_SITE), &property)
}

/// The HA rm-ids in configuration order, or `None` for a non-HA cluster.
pub fn rm_ids(conf_dir: &Path) -> Result<Option<Vec<String>>, Error> {
    let value = parse(&conf_dir.join(YARN_SITE), "yarn.resourcemanager.ha.rm-ids")?;
    Ok(value.map(|ids| ids.split(',').map(|id| id.trim().to_string()).collect()))
}

/// The HistoryServer webapp address from `mapred-site.xml`.
pub fn jobhistory_endpoint(conf_dir: &Path) -> Result<Option<String>, Error> {
    parse(&conf_dir.join(MAPRED_SITE), "mapreduce.jobhistory.webapp.address")
}

/// The NodeManager webapp address.
pub fn nodemanager_endpoint(conf_dir: &Path) -> Result<Option<String>, Error> {
    parse(&conf_dir.join(YARN_SITE), "yarn.nodemanager.webapp.address")
}

/// The web-proxy address, falling back to the ResourceManager address
/// when unset (the proxy colocates with the RM by default).
pub fn webproxy_endpoint(conf_dir: &Path) -> Result<Option<String>, Error> {
    match parse(&conf_dir.join(YARN_SITE), "yarn.web-proxy.address")? {
        Some(value) => Ok(Some(value)),
        None => resource_manager_endpoint(conf_dir, None),
    }
}

/// The memory available for containers on a node, in megabytes.
pub fn container_memory_mb(conf_dir: &Path) -> Result<Option<u64>, Error> {
    match parse(&conf_dir.join(YARN_SITE), "yarn.nodemanager.resource.memory-mb")? {
        Some(value) => {
            let mb = value.parse::<u64>().map_err(|_| {
                Error::Configuration(format!(
                    "yarn.nodemanager.resource.memory-mb is not numeric: '{}'",
                    value
                ))
            })?;
            Ok(Some(mb))
        },
        None => Ok(None),
    }
}

/// Probes whether `url` points at the currently active ResourceManager.
///
/// Issues `GET {url}/cluster` and applies the HA decision table: any
/// transport failure or non-200 status means inactive, and so does a 200
/// carrying a `Refresh` header, because standby RMs answer with a
/// redirect-via-refresh page. This predicate never fails; every error
/// path degrades to `false` so the caller's candidate loop can move on.
pub async fn check_is_active_rm(
    url: &str,
    timeout: Duration,
    auth: Option<&dyn Authenticator>,
    verify: bool,
) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(!verify)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error:? = e; "Cannot build probe client");
            return false;
        },
    };

    let mut request = client.get(format!("{}/cluster", url));
    if let Some(auth) = auth {
        request = match auth.decorate(&client, request).await {
            Ok(request) => request,
            Err(e) => {
                warn!(url = url, error:? = e; "Cannot authenticate probe request");
                return false;
            },
        };
    }

    match request.send().await {
        Ok(response) => {
            if response.status() != reqwest::StatusCode::OK {
                debug!(url = url, status:% = response.status(); "Candidate answered non-200, not active");
                false
            } else if response.headers().contains_key("Refresh") {
                debug!(url = url; "Candidate serves a refresh redirect, standby");
                false
            } else {
                debug!(url = url; "Candidate is the active resource manager");
                true
            }
        },
        Err(e) => {
            warn!(url = url, error:? = e; "Candidate unreachable");
            false
        },
    }
}
