//! Cluster URL verification.
//!
//! Responsibilities:
//! - Check that a host URL has an `http`/`https` scheme, a host and a port.
//! - Fill in the scheme's default port (80/443) when none is given.
//! - Expose host and port separately for diagnostics.
//!
//! Does NOT handle:
//! - Reachability checks (see the client crate).

use std::fmt;

use url::Url;

use crate::error::ConfigError;

/// A verified, normalized cluster URL of the form `scheme://host:port[/path]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterUrl {
    normalized: String,
    host: String,
    port: u16,
}

impl ClusterUrl {
    /// The normalized URL string.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Host part of the URL (IPv6 hosts keep their brackets).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit or scheme-default port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ClusterUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Verify and normalize a cluster URL.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] if the URL cannot be parsed, uses a
/// scheme other than `http`/`https`, or has no host.
pub fn verify_url_schema(raw: &str) -> Result<ClusterUrl, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidUrl {
        url: raw.to_string(),
        message: message.to_string(),
    };

    let parsed = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(invalid("scheme must be http or https"));
    }

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid("missing host"))?
        .to_string();

    let port = parsed
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port"))?;

    let path = parsed.path().trim_end_matches('/');
    let normalized = format!("{scheme}://{host}:{port}{path}");

    Ok(ClusterUrl {
        normalized,
        host,
        port,
    })
}
