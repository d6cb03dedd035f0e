//! Canonical network address for a YARN web service.
//!
//! An [`Endpoint`] is parsed once from a raw `host[:port]` or
//! `scheme://host[:port]` string and is immutable afterwards. The scheme
//! defaults to `http` when the raw string carries none; the port stays
//! absent unless one was given, so rebuilding a URL never invents a port
//! the operator did not configure.

use std::fmt;

use url::Url;

use crate::error::Error;

/// A canonical `scheme://host[:port]` address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Endpoint {
    /// Parses a raw endpoint string, prepending `http://` when the string
    /// carries no scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the string does not parse as
    /// a URL or parses without a hostname.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let normalized = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("http://{}", raw)
        };

        let url = Url::parse(&normalized)
            .map_err(|e| Error::Configuration(format!("Invalid endpoint '{}': {}", raw, e)))?;

        let host = match url.host() {
            // Re-bracket IPv6 literals so `to_url` rebuilds a valid authority.
            Some(url::Host::Ipv6(address)) => format!("[{}]", address),
            Some(host) => host.to_string(),
            None => {
                return Err(Error::Configuration(format!("Endpoint '{}' has no hostname", raw)));
            },
        };

        // `Url::port()` reports nothing for scheme-default ports, but an
        // explicit `:80` or `:443` in the raw string must survive.
        let port = url.port().or_else(|| {
            if authority_has_port(&normalized) {
                url.port_or_known_default()
            } else {
                None
            }
        });

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Whether the endpoint is reached over TLS.
    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }

    /// Fills in `port` when none was parsed. Used only for endpoints read
    /// from cluster configuration, where each role has a well-known
    /// default webapp port; explicit user-supplied endpoints are taken
    /// verbatim.
    pub fn with_default_port(mut self, port: u16) -> Self {
        if self.port.is_none() {
            self.port = Some(port);
        }
        self
    }

    /// Reconstructs `scheme://host[:port]{path}`, preserving the absence
    /// of a port exactly.
    pub fn to_url(&self, path: &str) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}{}", self.scheme, self.host, port, path),
            None => format!("{}://{}{}", self.scheme, self.host, path),
        }
    }
}

/// Whether the authority part of an already-normalized URL string spells
/// out a port. Brackets guard IPv6 literals, whose colons are not port
/// separators.
fn authority_has_port(normalized: &str) -> bool {
    let after_scheme = match normalized.find("://") {
        Some(index) => &normalized[index + 3..],
        None => normalized,
    };
    let authority = after_scheme.split(['/', '?', '#']).next().unwrap_or("");
    let host_end = authority.rfind(']').map(|index| index + 1).unwrap_or(0);
    authority[host_end..].contains(':')
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_url(""))
    }
}
