//! API endpoint configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Default API protocol.
pub const DEFAULT_PROTOCOL: Protocol = Protocol::Https;

/// Default API hostname.
pub const DEFAULT_HOSTNAME: &str = "api.reyah.eu";

/// Environment variable overriding the API protocol.
pub const PROTOCOL_ENV: &str = "REYAH_API_PROTOCOL";

/// Environment variable overriding the API hostname.
pub const HOSTNAME_ENV: &str = "REYAH_API_HOSTNAME";

/// Scheme used to reach the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain HTTP. Only meant for local development.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Protocol {
    /// The URL scheme for this protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(Error::Config(format!("unsupported protocol '{}'", other))),
        }
    }
}

/// Where the API lives.
///
/// Set once when building the [`Client`](crate::Client); falls back to
/// `https://api.reyah.eu` when nothing is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API protocol.
    pub protocol: Protocol,
    /// API hostname, optionally with a port.
    pub hostname: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL,
            hostname: DEFAULT_HOSTNAME.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration for the given protocol and hostname.
    pub fn new(protocol: Protocol, hostname: impl Into<String>) -> Self {
        Self {
            protocol,
            hostname: hostname.into(),
        }
    }

    /// Load the configuration from `REYAH_API_PROTOCOL` and `REYAH_API_HOSTNAME`.
    ///
    /// Each unset variable falls back to its default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(protocol) = lookup(PROTOCOL_ENV) {
            config.protocol = protocol.parse()?;
        }
        if let Some(hostname) = lookup(HOSTNAME_ENV) {
            let hostname = hostname.trim().trim_end_matches('/');
            if hostname.is_empty() {
                return Err(Error::Config(format!("{} is empty", HOSTNAME_ENV)));
            }
            config.hostname = hostname.to_string();
        }
        Ok(config)
    }

    /// Build a configuration from a base URL such as `http://localhost:8080`.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        let protocol = url.scheme().parse()?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::Config(format!("base URL '{}' has no host", base_url)))?;
        let hostname = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Ok(Self { protocol, hostname })
    }

    /// `protocol://hostname`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}",
            self.protocol,
            self.hostname.trim_end_matches('/')
        )
    }

    /// Resolve an API subpath into an absolute URL.
    pub fn resolve(&self, subpath: &str) -> Result<Url> {
        let url = format!("{}/{}", self.base_url(), subpath.trim_start_matches('/'));
        Ok(Url::parse(&url)?)
    }
}
