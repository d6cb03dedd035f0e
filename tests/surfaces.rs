//! End-to-end surface tests against mock HTTP servers.

use std::fs;
use std::time::Duration;

use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yarn_api_client::{ApplicationMaster, Error, HistoryServer, NodeManager, ResourceManager};

fn write_yarn_site(dir: &TempDir, properties: &[(&str, &str)]) {
    let mut body = String::from("<?xml version=\"1.0\"?>\n<configuration>\n");
    for (name, value) in properties {
        body.push_str(&format!(
            "  <property><name>{}</name><value>{}</value></property>\n",
            name, value
        ));
    }
    body.push_str("</configuration>\n");
    fs::write(dir.path().join("yarn-site.xml"), body).unwrap();
}

fn set_conf_dir(dir: &TempDir) {
    unsafe {
        std::env::set_var("HADOOP_CONF_DIR", dir.path());
    }
}

async fn active_rm() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cluster"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
#[serial]
async fn explicit_endpoint_never_touches_the_config_resolver() {
    // A malformed yarn-site.xml would make any resolver lookup fatal, so
    // successful construction proves the resolver was not consulted.
    let conf = TempDir::new().unwrap();
    fs::write(conf.path().join("yarn-site.xml"), "<configuration><broken").unwrap();
    fs::write(conf.path().join("mapred-site.xml"), "<configuration><broken").unwrap();
    set_conf_dir(&conf);

    let nm = NodeManager::new(Some("nodehost:8042")).await.unwrap();
    assert_eq!(nm.endpoint().unwrap().to_url(""), "http://nodehost:8042");

    let hs = HistoryServer::new(Some("historyhost:19888")).await.unwrap();
    assert_eq!(hs.endpoint().unwrap().to_url(""), "http://historyhost:19888");

    let am = ApplicationMaster::new(Some("proxyhost")).await.unwrap();
    assert_eq!(am.endpoint().unwrap().to_url(""), "http://proxyhost");
}

#[tokio::test]
async fn illegal_arguments_fail_before_any_network_call() {
    let server = MockServer::start().await;
    let nm = NodeManager::new(Some(&server.uri())).await.unwrap();

    let err = nm.node_applications(Some("SLEEPING"), None).await.unwrap_err();
    assert!(matches!(err, Error::IllegalArgument(_)));

    let hs = HistoryServer::new(Some(&server.uri())).await.unwrap();
    let err = hs.jobs(Some("NOT_A_STATE"), None, None, None, None, None, None, None).await.unwrap_err();
    assert!(matches!(err, Error::IllegalArgument(_)));

    let err = hs.job_tasks("job_1", Some("x")).await.unwrap_err();
    assert!(matches!(err, Error::IllegalArgument(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no request may be sent for illegal arguments");
}

#[tokio::test]
async fn rm_illegal_arguments_fail_after_probe_only() {
    let server = active_rm().await;
    let rm = ResourceManager::new(Some(vec![server.uri()])).await.unwrap();

    let err = rm.cluster_nodes(Some(&["SLEEPING"])).await.unwrap_err();
    assert!(matches!(err, Error::IllegalArgument(_)));

    let err = rm
        .cluster_applications(
            Some("NOT_A_STATE"),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::IllegalArgument(_)));

    let err = rm.cluster_container_signal("container_1", "SIGKILL").await.unwrap_err();
    assert!(matches!(err, Error::IllegalArgument(_)));

    // Only the construction-time health probe reached the server.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/cluster");
}

#[tokio::test]
async fn ha_selection_binds_the_first_active_candidate() {
    let standby = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cluster"))
        .respond_with(ResponseTemplate::new(200).insert_header("Refresh", "3; url=http://other/cluster"))
        .mount(&standby)
        .await;

    let active = active_rm().await;
    Mock::given(method("GET"))
        .and(path("/ws/v1/cluster/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clusterInfo": {"state": "STARTED"}})))
        .mount(&active)
        .await;

    let rm = ResourceManager::new(Some(vec![standby.uri(), active.uri()])).await.unwrap();
    assert_eq!(rm.endpoint().unwrap().to_url(""), active.uri());

    // Follow-up calls go to the bound candidate, not the standby.
    let response = rm.cluster_information().await.unwrap();
    assert_eq!(response.data["clusterInfo"]["state"], "STARTED");

    let standby_requests = standby.received_requests().await.unwrap();
    assert!(standby_requests.iter().all(|r| r.url.path() == "/cluster"));
}

#[tokio::test]
async fn no_active_candidate_is_a_fatal_construction_error() {
    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cluster"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&down)
        .await;

    let result = ResourceManager::with_config(
        Some(vec![down.uri(), "http://127.0.0.1:1".to_string()]),
        Duration::from_millis(500),
        None,
        true,
    )
    .await;

    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[tokio::test]
#[serial]
async fn rm_candidates_derive_from_ha_rm_ids_in_order() {
    let standby = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cluster"))
        .respond_with(ResponseTemplate::new(200).insert_header("Refresh", "3; url=elsewhere"))
        .mount(&standby)
        .await;

    let active = active_rm().await;

    let conf = TempDir::new().unwrap();
    write_yarn_site(
        &conf,
        &[
            ("yarn.resourcemanager.ha.rm-ids", "rm1,rm2"),
            ("yarn.resourcemanager.webapp.address.rm1", standby.uri().trim_start_matches("http://")),
            ("yarn.resourcemanager.webapp.address.rm2", active.uri().trim_start_matches("http://")),
        ],
    );
    set_conf_dir(&conf);

    let rm = ResourceManager::new(None).await.unwrap();
    assert_eq!(rm.endpoint().unwrap().to_url(""), active.uri());
}

#[tokio::test]
#[serial]
async fn configured_endpoints_get_role_default_ports() {
    let conf = TempDir::new().unwrap();
    write_yarn_site(&conf, &[("yarn.nodemanager.webapp.address", "worker7")]);
    fs::write(
        conf.path().join("mapred-site.xml"),
        "<configuration><property><name>mapreduce.jobhistory.webapp.address</name>\
         <value>history1</value></property></configuration>",
    )
    .unwrap();
    set_conf_dir(&conf);

    let nm = NodeManager::new(None).await.unwrap();
    assert_eq!(nm.endpoint().unwrap().to_url(""), "http://worker7:8042");

    let hs = HistoryServer::new(None).await.unwrap();
    assert_eq!(hs.endpoint().unwrap().to_url(""), "http://history1:19888");
}

#[tokio::test]
#[serial]
async fn unresolvable_endpoint_surfaces_on_first_request() {
    let conf = TempDir::new().unwrap();
    write_yarn_site(&conf, &[]);
    fs::write(conf.path().join("mapred-site.xml"), "<configuration/>").unwrap();
    set_conf_dir(&conf);

    let nm = NodeManager::new(None).await.unwrap();
    assert!(nm.endpoint().is_none());

    let err = nm.node_information().await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn cluster_applications_serializes_only_given_filters() {
    let server = active_rm().await;
    Mock::given(method("GET"))
        .and(path("/ws/v1/cluster/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"apps": null})))
        .mount(&server)
        .await;

    let rm = ResourceManager::new(Some(vec![server.uri()])).await.unwrap();
    rm.cluster_applications(
        Some("KILLED"),
        None,
        None,
        None,
        Some("low"),
        Some(10),
        None,
        None,
        None,
        None,
        None,
        None,
        None,
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    let apps_request = requests.iter().find(|r| r.url.path() == "/ws/v1/cluster/apps").unwrap();
    assert_eq!(apps_request.url.query(), Some("state=KILLED&queue=low&limit=10"));
}

#[tokio::test]
async fn repeated_calls_build_identical_queries() {
    let server = active_rm().await;
    Mock::given(method("GET"))
        .and(path("/ws/v1/cluster/nodes"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let rm = ResourceManager::new(Some(vec![server.uri()])).await.unwrap();
    rm.cluster_nodes(Some(&["NEW"])).await.unwrap();
    rm.cluster_nodes(Some(&["NEW"])).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let queries: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/ws/v1/cluster/nodes")
        .map(|r| r.url.query().unwrap().to_string())
        .collect();
    assert_eq!(queries, vec!["states=NEW".to_string(), "states=NEW".to_string()]);
}

#[tokio::test]
async fn kill_and_submit_use_documented_bodies() {
    let server = active_rm().await;
    Mock::given(method("PUT"))
        .and(path("/ws/v1/cluster/apps/application_1/state"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ws/v1/cluster/apps"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let rm = ResourceManager::new(Some(vec![server.uri()])).await.unwrap();
    rm.cluster_application_kill("application_1").await.unwrap();
    rm.cluster_submit_application(json!({"application-id": "application_1"})).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let kill = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    assert_eq!(serde_json::from_slice::<serde_json::Value>(&kill.body).unwrap(), json!({"state": "KILLED"}));

    let submit = requests.iter().find(|r| r.url.path() == "/ws/v1/cluster/apps").unwrap();
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&submit.body).unwrap(),
        json!({"application-id": "application_1"})
    );
}

#[tokio::test]
async fn delegation_token_operations_carry_the_token_header() {
    let server = active_rm().await;
    Mock::given(method("POST"))
        .and(path("/ws/v1/cluster/delegation-token/expiration"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/ws/v1/cluster/delegation-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let rm = ResourceManager::new(Some(vec![server.uri()])).await.unwrap();
    rm.cluster_renew_delegation_token("MgASY2x1c3Rlcg").await.unwrap();
    rm.cluster_cancel_delegation_token("MgASY2x1c3Rlcg").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    for request in requests.iter().filter(|r| r.url.path().starts_with("/ws/v1/cluster/delegation-token")) {
        assert_eq!(
            request
                .headers
                .get("Hadoop-YARN-RM-Delegation-Token")
                .unwrap()
                .to_str()
                .unwrap(),
            "MgASY2x1c3Rlcg"
        );
    }
}

#[tokio::test]
async fn am_paths_route_through_the_web_proxy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proxy/application_1/ws/v1/mapreduce/jobs/job_1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tasks": {"task": []}})))
        .mount(&server)
        .await;

    let am = ApplicationMaster::new(Some(&server.uri())).await.unwrap();
    let response = am.job_tasks("application_1", "job_1", Some("m")).await.unwrap();
    assert_eq!(response.data["tasks"]["task"], json!([]));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("types=m"));
}
