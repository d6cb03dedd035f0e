//! Legal value sets for enum-restricted request parameters.
//!
//! YARN rejects unknown enum values server-side with generic 500-class
//! errors, so the surfaces validate against these sets before any network
//! I/O and fail with [`Error::IllegalArgument`] instead.

use crate::error::Error;

/// States an application moves through on the ResourceManager.
pub const YARN_APPLICATION_STATES: &[&str] = &[
    "NEW",
    "NEW_SAVING",
    "SUBMITTED",
    "ACCEPTED",
    "RUNNING",
    "FINISHED",
    "FAILED",
    "KILLED",
];

/// States an application moves through on a NodeManager.
pub const APPLICATION_STATES: &[&str] = &[
    "NEW",
    "INITING",
    "RUNNING",
    "FINISHING_CONTAINERS_WAIT",
    "APPLICATION_RESOURCES_CLEANINGUP",
    "FINISHED",
];

/// Final status reported by an application when it terminates.
pub const FINAL_APPLICATION_STATUSES: &[&str] = &["UNDEFINED", "SUCCEEDED", "FAILED", "KILLED"];

/// Internal MapReduce job states served by the HistoryServer.
pub const JOB_STATES_INTERNAL: &[&str] = &[
    "NEW",
    "SETUP",
    "INITED",
    "RUNNING",
    "COMMITTING",
    "SUCCEEDED",
    "FAIL_WAIT",
    "FAIL_ABORT",
    "FAILED",
    "KILL_WAIT",
    "KILL_ABORT",
    "KILLED",
    "ERROR",
    "REBOOT",
];

/// States a cluster node can be in.
pub const NODE_STATES: &[&str] = &[
    "NEW",
    "RUNNING",
    "UNHEALTHY",
    "DECOMMISSIONING",
    "DECOMMISSIONED",
    "LOST",
    "REBOOTED",
    "SHUTDOWN",
];

/// MapReduce task types: map and reduce.
pub const TASK_TYPES: &[&str] = &["m", "r"];

/// Signals that can be delivered to a running container.
pub const CONTAINER_SIGNAL_COMMANDS: &[&str] =
    &["OUTPUT_THREAD_DUMP", "GRACEFUL_SHUTDOWN", "FORCEFUL_SHUTDOWN"];

/// Checks `value` against a legal value set, naming the parameter kind in
/// the error message.
pub(crate) fn ensure_legal(kind: &str, value: &str, legal: &[&str]) -> Result<(), Error> {
    if legal.contains(&value) {
        Ok(())
    } else {
        Err(Error::IllegalArgument(format!(
            "{} '{}' is illegal, expected one of: {}",
            kind,
            value,
            legal.join(", ")
        )))
    }
}
