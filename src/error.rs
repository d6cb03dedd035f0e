//! Error types for YARN REST API operations.
//!
//! This module defines the [`Error`] enum which encompasses all possible
//! failure modes when talking to a YARN cluster: bad client-side
//! configuration, illegal method arguments, non-success HTTP responses,
//! transport failures, and JSON (de)serialization problems.

use thiserror::Error;

/// Errors that can occur when constructing an API surface or issuing a
/// request through it.
///
/// # Error Categories
///
/// - **Configuration errors**: [`Configuration`](Error::Configuration) —
///   no endpoint could be resolved, a Hadoop configuration file is
///   malformed, or no HA candidate is active. Never retried.
/// - **Caller errors**: [`IllegalArgument`](Error::IllegalArgument) —
///   raised before any network I/O is attempted.
/// - **Server errors**: [`Api`](Error::Api) — the cluster answered with a
///   non-success status.
/// - **Network errors**: [`Transport`](Error::Transport) — connection
///   refused, timeout, DNS failure. Propagated as-is; the only place they
///   are swallowed is the ResourceManager health probe, which screens HA
///   candidates and reports them as simply inactive.
#[derive(Debug, Error)]
pub enum Error {
    /// The client is misconfigured: no endpoint is set or resolvable, a
    /// present configuration file cannot be parsed, or no ResourceManager
    /// HA candidate is active.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A method argument is outside its enumerated legal value set.
    ///
    /// This is raised before any request is built or sent.
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// The server returned a non-success HTTP status code.
    ///
    /// Carries the status and the raw response body verbatim so the
    /// cluster's own diagnostics reach the caller untouched.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The response body, which may contain error details.
        body: String,
    },

    /// The HTTP exchange itself failed: connection refused, timeout, DNS
    /// resolution failure, TLS handshake error.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failed to serialize a request body or deserialize a response body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
