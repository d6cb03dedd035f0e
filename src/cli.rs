//! Command-line surface of the `yarn-client` binary.
//!
//! Every public operation of the four API surfaces is declared here as a
//! static subcommand whose arguments mirror the method parameters. The
//! handler awaits the method and prints the JSON response pretty; any
//! error propagates and exits the process non-zero.

use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::auth::{Authenticator, SimpleAuth};
use crate::{ApplicationMaster, HistoryServer, NodeManager, ResourceManager};

#[derive(Parser)]
#[command(name = "yarn-client")]
#[command(about = "Hadoop YARN REST API client", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Service endpoint, e.g. rm.example.com:8088; for `rm` a comma-separated list of HA candidates. Resolved from the Hadoop configuration directory when omitted"
    )]
    pub endpoint: Option<String>,
    #[arg(long, global = true, default_value_t = 30, help = "Request timeout in seconds")]
    pub timeout: u64,
    #[arg(long, global = true, value_enum, help = "Authentication scheme")]
    pub auth: Option<AuthScheme>,
    #[arg(long, global = true, default_value = "gateway", help = "User name for simple authentication")]
    pub user: String,
    #[arg(long, global = true, help = "Disable TLS certificate verification")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
pub enum AuthScheme {
    /// Hadoop pseudo authentication with a cached hadoop.auth token
    Simple,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ResourceManager operations
    Rm {
        #[command(subcommand)]
        command: RmCommand,
    },
    /// NodeManager operations
    Nm {
        #[command(subcommand)]
        command: NmCommand,
    },
    /// ApplicationMaster operations (via the web proxy)
    Am {
        #[command(subcommand)]
        command: AmCommand,
    },
    /// HistoryServer operations
    Hs {
        #[command(subcommand)]
        command: HsCommand,
    },
}

#[derive(Subcommand)]
pub enum RmCommand {
    /// Cluster version and state
    ClusterInformation,
    /// Cluster-wide metrics
    ClusterMetrics,
    /// Scheduler configuration and queue tree
    ClusterScheduler,
    /// List applications, optionally filtered
    ClusterApplications {
        #[arg(long)]
        state: Option<String>,
        #[arg(long, value_delimiter = ',')]
        states: Vec<String>,
        #[arg(long)]
        final_status: Option<String>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        queue: Option<String>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        started_time_begin: Option<u64>,
        #[arg(long)]
        started_time_end: Option<u64>,
        #[arg(long)]
        finished_time_begin: Option<u64>,
        #[arg(long)]
        finished_time_end: Option<u64>,
        #[arg(long, value_delimiter = ',')]
        application_types: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        application_tags: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        de_selects: Vec<String>,
    },
    /// Application counts grouped by state and type
    ClusterApplicationStatistics {
        #[arg(long, value_delimiter = ',')]
        states: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        application_types: Vec<String>,
    },
    /// One application by id
    ClusterApplication { application_id: String },
    /// Attempts of an application
    ClusterApplicationAttempts { application_id: String },
    /// One attempt of an application
    ClusterApplicationAttemptInfo {
        application_id: String,
        attempt_id: String,
    },
    /// Containers of an application attempt
    ClusterApplicationAttemptContainers {
        application_id: String,
        attempt_id: String,
    },
    /// One container of an application attempt
    ClusterApplicationAttemptContainerInfo {
        application_id: String,
        attempt_id: String,
        container_id: String,
    },
    /// Current state of an application
    ClusterApplicationState { application_id: String },
    /// Kill an application
    ClusterApplicationKill { application_id: String },
    /// List cluster nodes, optionally filtered by state
    ClusterNodes {
        #[arg(long, value_delimiter = ',')]
        states: Vec<String>,
    },
    /// One cluster node by id
    ClusterNode { node_id: String },
    /// Update the total resources of a node
    ClusterNodeUpdateResource {
        node_id: String,
        #[arg(help = "Resource option document as inline JSON")]
        resource: String,
    },
    /// Reserve a new application id
    ClusterNewApplication,
    /// Submit an application
    ClusterSubmitApplication {
        #[arg(help = "Application submission document as inline JSON")]
        data: String,
    },
    /// Queue an application is placed in
    ClusterGetApplicationQueue { application_id: String },
    /// Move an application to another queue
    ClusterChangeApplicationQueue { application_id: String, queue: String },
    /// Priority of an application
    ClusterGetApplicationPriority { application_id: String },
    /// Change the priority of an application
    ClusterChangeApplicationPriority { application_id: String, priority: i64 },
    /// Container memory from the local Hadoop configuration
    ClusterNodeContainerMemory,
    /// Find a queue by name in the scheduler queue tree
    SchedulerQueue { queue_name: String },
    /// List reservations
    ClusterReservations {
        #[arg(long)]
        queue: Option<String>,
        #[arg(long)]
        reservation_id: Option<String>,
        #[arg(long)]
        start_time: Option<u64>,
        #[arg(long)]
        end_time: Option<u64>,
        #[arg(long)]
        include_resource_allocations: Option<bool>,
    },
    /// Reserve a new reservation id
    ClusterNewReservation,
    /// Submit a reservation
    ClusterSubmitReservation {
        #[arg(help = "Reservation document as inline JSON")]
        data: String,
    },
    /// Update a reservation
    ClusterUpdateReservation {
        #[arg(help = "Reservation document as inline JSON")]
        data: String,
    },
    /// Delete a reservation
    ClusterDeleteReservation { reservation_id: String },
    /// Create a delegation token
    ClusterNewDelegationToken { renewer: String },
    /// Renew a delegation token
    ClusterRenewDelegationToken { token: String },
    /// Cancel a delegation token
    ClusterCancelDelegationToken { token: String },
    /// Timeouts of an application
    ClusterApplicationTimeouts { application_id: String },
    /// One timeout of an application
    ClusterApplicationTimeout {
        application_id: String,
        timeout_type: String,
    },
    /// Update a timeout of an application
    ClusterUpdateApplicationTimeout {
        application_id: String,
        timeout_type: String,
        expiry_time: String,
    },
    /// Pending scheduler configuration mutation
    ClusterSchedulerConfMutation,
    /// Modify the scheduler configuration
    ClusterModifySchedulerConfMutation {
        #[arg(help = "Scheduler configuration update as inline JSON")]
        data: String,
    },
    /// Signal a container
    ClusterContainerSignal { container_id: String, command: String },
    /// Scheduler activities, optionally scoped to one node
    SchedulerActivities {
        #[arg(long)]
        node_id: Option<String>,
    },
    /// Scheduler activities of one application
    ApplicationActivities {
        application_id: String,
        #[arg(long)]
        max_time: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum NmCommand {
    /// Node version, health and capacity
    NodeInformation,
    /// Applications on this node, optionally filtered
    NodeApplications {
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// One application on this node
    NodeApplication { application_id: String },
    /// Containers on this node
    NodeContainers,
    /// One container on this node
    NodeContainer { container_id: String },
    /// Auxiliary services on this node
    AuxiliaryServices,
    /// Update auxiliary services on this node
    AuxiliaryServicesUpdate {
        #[arg(help = "Auxiliary services manifest as inline JSON")]
        data: String,
    },
}

#[derive(Subcommand)]
pub enum AmCommand {
    /// ApplicationMaster information
    ApplicationInformation { application_id: String },
    /// Jobs of a running application
    Jobs { application_id: String },
    /// One job of a running application
    Job { application_id: String, job_id: String },
    /// Attempts of a job
    JobAttempts { application_id: String, job_id: String },
    /// Counters of a job
    JobCounters { application_id: String, job_id: String },
    /// Configuration of a job
    JobConf { application_id: String, job_id: String },
    /// Tasks of a job, optionally filtered by type (m or r)
    JobTasks {
        application_id: String,
        job_id: String,
        #[arg(long = "type")]
        task_type: Option<String>,
    },
    /// One task of a job
    JobTask {
        application_id: String,
        job_id: String,
        task_id: String,
    },
    /// Counters of a task
    TaskCounters {
        application_id: String,
        job_id: String,
        task_id: String,
    },
    /// Attempts of a task
    TaskAttempts {
        application_id: String,
        job_id: String,
        task_id: String,
    },
    /// One attempt of a task
    TaskAttempt {
        application_id: String,
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
    /// Counters of a task attempt
    TaskAttemptCounters {
        application_id: String,
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
    /// State of a task attempt
    TaskAttemptState {
        application_id: String,
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
    /// Kill a task attempt
    TaskAttemptStateKill {
        application_id: String,
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
}

#[derive(Subcommand)]
pub enum HsCommand {
    /// HistoryServer information
    ApplicationInformation,
    /// Completed jobs, optionally filtered
    Jobs {
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        queue: Option<String>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        started_time_begin: Option<u64>,
        #[arg(long)]
        started_time_end: Option<u64>,
        #[arg(long)]
        finished_time_begin: Option<u64>,
        #[arg(long)]
        finished_time_end: Option<u64>,
    },
    /// One completed job
    Job { job_id: String },
    /// Attempts of a job
    JobAttempts { job_id: String },
    /// Counters of a job
    JobCounters { job_id: String },
    /// Configuration of a job
    JobConf { job_id: String },
    /// Tasks of a job, optionally filtered by type (m or r)
    JobTasks {
        job_id: String,
        #[arg(long = "type")]
        task_type: Option<String>,
    },
    /// One task of a job
    JobTask { job_id: String, task_id: String },
    /// Counters of a task
    TaskCounters { job_id: String, task_id: String },
    /// Attempts of a task
    TaskAttempts { job_id: String, task_id: String },
    /// One attempt of a task
    TaskAttempt {
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
    /// Counters of a task attempt
    TaskAttemptCounters {
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let timeout = Duration::from_secs(self.timeout);
        let verify = !self.insecure;
        let auth: Option<Box<dyn Authenticator>> = match self.auth {
            Some(AuthScheme::Simple) => Some(Box::new(SimpleAuth::new(self.user.clone()))),
            None => None,
        };

        let output = match self.command {
            Commands::Rm { command } => {
                let endpoints = self.endpoint.as_deref().map(split_endpoints);
                let rm = ResourceManager::with_config(endpoints, timeout, auth, verify).await?;
                run_rm(&rm, command).await?
            },
            Commands::Nm { command } => {
                let nm = NodeManager::with_config(self.endpoint.as_deref(), timeout, auth, verify).await?;
                run_nm(&nm, command).await?
            },
            Commands::Am { command } => {
                let am = ApplicationMaster::with_config(self.endpoint.as_deref(), timeout, auth, verify).await?;
                run_am(&am, command).await?
            },
            Commands::Hs { command } => {
                let hs = HistoryServer::with_config(self.endpoint.as_deref(), timeout, auth, verify).await?;
                run_hs(&hs, command).await?
            },
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

/// Splits a comma-separated HA candidate list, trimming each entry the
/// same way `hadoop_conf::rm_ids` does.
fn split_endpoints(list: &str) -> Vec<String> {
    list.split(',').map(|endpoint| endpoint.trim().to_string()).collect()
}

fn opt_strs(values: &[String]) -> Option<Vec<&str>> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().map(String::as_str).collect())
    }
}

fn parse_body(data: &str) -> anyhow::Result<Value> {
    serde_json::from_str(data).context("Request body is not valid JSON")
}

async fn run_rm(rm: &ResourceManager, command: RmCommand) -> anyhow::Result<Value> {
    let data = match command {
        RmCommand::ClusterInformation => rm.cluster_information().await?.data,
        RmCommand::ClusterMetrics => rm.cluster_metrics().await?.data,
        RmCommand::ClusterScheduler => rm.cluster_scheduler().await?.data,
        RmCommand::ClusterApplications {
            state,
            states,
            final_status,
            user,
            queue,
            limit,
            started_time_begin,
            started_time_end,
            finished_time_begin,
            finished_time_end,
            application_types,
            application_tags,
            de_selects,
        } => {
            let states = opt_strs(&states);
            let application_types = opt_strs(&application_types);
            let application_tags = opt_strs(&application_tags);
            let de_selects = opt_strs(&de_selects);
            rm.cluster_applications(
                state.as_deref(),
                states.as_deref(),
                final_status.as_deref(),
                user.as_deref(),
                queue.as_deref(),
                limit,
                started_time_begin,
                started_time_end,
                finished_time_begin,
                finished_time_end,
                application_types.as_deref(),
                application_tags.as_deref(),
                de_selects.as_deref(),
            )
            .await?
            .data
        },
        RmCommand::ClusterApplicationStatistics {
            states,
            application_types,
        } => {
            let states = opt_strs(&states);
            let application_types = opt_strs(&application_types);
            rm.cluster_application_statistics(states.as_deref(), application_types.as_deref())
                .await?
                .data
        },
        RmCommand::ClusterApplication { application_id } => rm.cluster_application(&application_id).await?.data,
        RmCommand::ClusterApplicationAttempts { application_id } => {
            rm.cluster_application_attempts(&application_id).await?.data
        },
        RmCommand::ClusterApplicationAttemptInfo {
            application_id,
            attempt_id,
        } => rm.cluster_application_attempt_info(&application_id, &attempt_id).await?.data,
        RmCommand::ClusterApplicationAttemptContainers {
            application_id,
            attempt_id,
        } => {
            rm.cluster_application_attempt_containers(&application_id, &attempt_id)
                .await?
                .data
        },
        RmCommand::ClusterApplicationAttemptContainerInfo {
            application_id,
            attempt_id,
            container_id,
        } => {
            rm.cluster_application_attempt_container_info(&application_id, &attempt_id, &container_id)
                .await?
                .data
        },
        RmCommand::ClusterApplicationState { application_id } => {
            rm.cluster_application_state(&application_id).await?.data
        },
        RmCommand::ClusterApplicationKill { application_id } => rm.cluster_application_kill(&application_id).await?.data,
        RmCommand::ClusterNodes { states } => {
            let states = opt_strs(&states);
            rm.cluster_nodes(states.as_deref()).await?.data
        },
        RmCommand::ClusterNode { node_id } => rm.cluster_node(&node_id).await?.data,
        RmCommand::ClusterNodeUpdateResource { node_id, resource } => {
            rm.cluster_node_update_resource(&node_id, parse_body(&resource)?).await?.data
        },
        RmCommand::ClusterNewApplication => rm.cluster_new_application().await?.data,
        RmCommand::ClusterSubmitApplication { data } => {
            rm.cluster_submit_application(parse_body(&data)?).await?.data
        },
        RmCommand::ClusterGetApplicationQueue { application_id } => {
            rm.cluster_get_application_queue(&application_id).await?.data
        },
        RmCommand::ClusterChangeApplicationQueue { application_id, queue } => {
            rm.cluster_change_application_queue(&application_id, &queue).await?.data
        },
        RmCommand::ClusterGetApplicationPriority { application_id } => {
            rm.cluster_get_application_priority(&application_id).await?.data
        },
        RmCommand::ClusterChangeApplicationPriority {
            application_id,
            priority,
        } => rm.cluster_change_application_priority(&application_id, priority).await?.data,
        RmCommand::ClusterNodeContainerMemory => serde_json::json!(rm.cluster_node_container_memory()?),
        RmCommand::SchedulerQueue { queue_name } => {
            let scheduler = rm.cluster_scheduler().await?.data;
            match ResourceManager::cluster_scheduler_queue(&scheduler, &queue_name) {
                Some(queue) => queue.clone(),
                None => bail!("Queue '{}' not found in the scheduler queue tree", queue_name),
            }
        },
        RmCommand::ClusterReservations {
            queue,
            reservation_id,
            start_time,
            end_time,
            include_resource_allocations,
        } => {
            rm.cluster_reservations(
                queue.as_deref(),
                reservation_id.as_deref(),
                start_time,
                end_time,
                include_resource_allocations,
            )
            .await?
            .data
        },
        RmCommand::ClusterNewReservation => rm.cluster_new_reservation().await?.data,
        RmCommand::ClusterSubmitReservation { data } => {
            rm.cluster_submit_reservation(parse_body(&data)?).await?.data
        },
        RmCommand::ClusterUpdateReservation { data } => {
            rm.cluster_update_reservation(parse_body(&data)?).await?.data
        },
        RmCommand::ClusterDeleteReservation { reservation_id } => {
            rm.cluster_delete_reservation(&reservation_id).await?.data
        },
        RmCommand::ClusterNewDelegationToken { renewer } => rm.cluster_new_delegation_token(&renewer).await?.data,
        RmCommand::ClusterRenewDelegationToken { token } => rm.cluster_renew_delegation_token(&token).await?.data,
        RmCommand::ClusterCancelDelegationToken { token } => rm.cluster_cancel_delegation_token(&token).await?.data,
        RmCommand::ClusterApplicationTimeouts { application_id } => {
            rm.cluster_application_timeouts(&application_id).await?.data
        },
        RmCommand::ClusterApplicationTimeout {
            application_id,
            timeout_type,
        } => rm.cluster_application_timeout(&application_id, &timeout_type).await?.data,
        RmCommand::ClusterUpdateApplicationTimeout {
            application_id,
            timeout_type,
            expiry_time,
        } => {
            rm.cluster_update_application_timeout(&application_id, &timeout_type, &expiry_time)
                .await?
                .data
        },
        RmCommand::ClusterSchedulerConfMutation => rm.cluster_scheduler_conf_mutation().await?.data,
        RmCommand::ClusterModifySchedulerConfMutation { data } => {
            rm.cluster_modify_scheduler_conf_mutation(parse_body(&data)?).await?.data
        },
        RmCommand::ClusterContainerSignal { container_id, command } => {
            rm.cluster_container_signal(&container_id, &command).await?.data
        },
        RmCommand::SchedulerActivities { node_id } => rm.scheduler_activities(node_id.as_deref()).await?.data,
        RmCommand::ApplicationActivities {
            application_id,
            max_time,
        } => rm.application_activities(&application_id, max_time).await?.data,
    };

    Ok(data)
}

async fn run_nm(nm: &NodeManager, command: NmCommand) -> anyhow::Result<Value> {
    let data = match command {
        NmCommand::NodeInformation => nm.node_information().await?.data,
        NmCommand::NodeApplications { state, user } => {
            nm.node_applications(state.as_deref(), user.as_deref()).await?.data
        },
        NmCommand::NodeApplication { application_id } => nm.node_application(&application_id).await?.data,
        NmCommand::NodeContainers => nm.node_containers().await?.data,
        NmCommand::NodeContainer { container_id } => nm.node_container(&container_id).await?.data,
        NmCommand::AuxiliaryServices => nm.auxiliary_services().await?.data,
        NmCommand::AuxiliaryServicesUpdate { data } => nm.auxiliary_services_update(parse_body(&data)?).await?.data,
    };

    Ok(data)
}

async fn run_am(am: &ApplicationMaster, command: AmCommand) -> anyhow::Result<Value> {
    let data = match command {
        AmCommand::ApplicationInformation { application_id } => am.application_information(&application_id).await?.data,
        AmCommand::Jobs { application_id } => am.jobs(&application_id).await?.data,
        AmCommand::Job { application_id, job_id } => am.job(&application_id, &job_id).await?.data,
        AmCommand::JobAttempts { application_id, job_id } => am.job_attempts(&application_id, &job_id).await?.data,
        AmCommand::JobCounters { application_id, job_id } => am.job_counters(&application_id, &job_id).await?.data,
        AmCommand::JobConf { application_id, job_id } => am.job_conf(&application_id, &job_id).await?.data,
        AmCommand::JobTasks {
            application_id,
            job_id,
            task_type,
        } => am.job_tasks(&application_id, &job_id, task_type.as_deref()).await?.data,
        AmCommand::JobTask {
            application_id,
            job_id,
            task_id,
        } => am.job_task(&application_id, &job_id, &task_id).await?.data,
        AmCommand::TaskCounters {
            application_id,
            job_id,
            task_id,
        } => am.task_counters(&application_id, &job_id, &task_id).await?.data,
        AmCommand::TaskAttempts {
            application_id,
            job_id,
            task_id,
        } => am.task_attempts(&application_id, &job_id, &task_id).await?.data,
        AmCommand::TaskAttempt {
            application_id,
            job_id,
            task_id,
            attempt_id,
        } => am.task_attempt(&application_id, &job_id, &task_id, &attempt_id).await?.data,
        AmCommand::TaskAttemptCounters {
            application_id,
            job_id,
            task_id,
            attempt_id,
        } => {
            am.task_attempt_counters(&application_id, &job_id, &task_id, &attempt_id)
                .await?
                .data
        },
        AmCommand::TaskAttemptState {
            application_id,
            job_id,
            task_id,
            attempt_id,
        } => am.task_attempt_state(&application_id, &job_id, &task_id, &attempt_id).await?.data,
        AmCommand::TaskAttemptStateKill {
            application_id,
            job_id,
            task_id,
            attempt_id,
        } => {
            am.task_attempt_state_kill(&application_id, &job_id, &task_id, &attempt_id)
                .await?
                .data
        },
    };

    Ok(data)
}

async fn run_hs(hs: &HistoryServer, command: HsCommand) -> anyhow::Result<Value> {
    let data = match command {
        HsCommand::ApplicationInformation => hs.application_information().await?.data,
        HsCommand::Jobs {
            state,
            user,
            queue,
            limit,
            started_time_begin,
            started_time_end,
            finished_time_begin,
            finished_time_end,
        } => {
            hs.jobs(
                state.as_deref(),
                user.as_deref(),
                queue.as_deref(),
                limit,
                started_time_begin,
                started_time_end,
                finished_time_begin,
                finished_time_end,
            )
            .await?
            .data
        },
        HsCommand::Job { job_id } => hs.job(&job_id).await?.data,
        HsCommand::JobAttempts { job_id } => hs.job_attempts(&job_id).await?.data,
        HsCommand::JobCounters { job_id } => hs.job_counters(&job_id).await?.data,
        HsCommand::JobConf { job_id } => hs.job_conf(&job_id).await?.data,
        HsCommand::JobTasks { job_id, task_type } => hs.job_tasks(&job_id, task_type.as_deref()).await?.data,
        HsCommand::JobTask { job_id, task_id } => hs.job_task(&job_id, &task_id).await?.data,
        HsCommand::TaskCounters { job_id, task_id } => hs.task_counters(&job_id, &task_id).await?.data,
        HsCommand::TaskAttempts { job_id, task_id } => hs.task_attempts(&job_id, &task_id).await?.data,
        HsCommand::TaskAttempt {
            job_id,
            task_id,
            attempt_id,
        } => hs.task_attempt(&job_id, &task_id, &attempt_id).await?.data,
        HsCommand::TaskAttemptCounters {
            job_id,
            task_id,
            attempt_id,
        } => hs.task_attempt_counters(&job_id, &task_id, &attempt_id).await?.data,
    };

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_table_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rm_endpoint_list_splits_on_commas() {
        let cli = Cli::parse_from([
            "yarn-client",
            "rm",
            "--endpoint",
            "master1:8088,master2:8088",
            "cluster-information",
        ]);

        let endpoints = cli.endpoint.as_deref().map(split_endpoints).unwrap();
        assert_eq!(endpoints, vec!["master1:8088".to_string(), "master2:8088".to_string()]);
    }

    #[test]
    fn rm_endpoint_list_entries_are_trimmed() {
        let endpoints = split_endpoints("master1:8088, master2:8088 ,master3:8088");
        assert_eq!(
            endpoints,
            vec![
                "master1:8088".to_string(),
                "master2:8088".to_string(),
                "master3:8088".to_string(),
            ]
        );
    }

    #[test]
    fn applications_filters_parse() {
        let cli = Cli::parse_from([
            "yarn-client",
            "rm",
            "cluster-applications",
            "--state",
            "KILLED",
            "--queue",
            "low",
            "--limit",
            "10",
        ]);

        match cli.command {
            Commands::Rm {
                command: RmCommand::ClusterApplications { state, queue, limit, .. },
            } => {
                assert_eq!(state.as_deref(), Some("KILLED"));
                assert_eq!(queue.as_deref(), Some("low"));
                assert_eq!(limit, Some(10));
            },
            _ => panic!("parsed into the wrong command"),
        }
    }
}
