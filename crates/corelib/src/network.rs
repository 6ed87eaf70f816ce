//! Endpoint identity shared across the workspace.
//!
//! An [`Endpoint`] is the address a node broadcasts to its peers. Replica
//! lists, pending sets and the snitch are all keyed by it, and equality is
//! plain address equality.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Port assumed when an endpoint is written as a bare IP address.
pub const DEFAULT_STORAGE_PORT: u16 = 7000;

/// Broadcast address of a node.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(SocketAddr);

impl Endpoint {
    pub fn new(addr: SocketAddr) -> Self {
        Self(addr)
    }

    /// Endpoint on the default storage port.
    pub fn from_ip(ip: impl Into<IpAddr>) -> Self {
        Self(SocketAddr::new(ip.into(), DEFAULT_STORAGE_PORT))
    }

    pub fn addr(&self) -> SocketAddr {
        self.0
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    /// Accepts `ip:port` or a bare `ip` (default storage port).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self(addr));
        }
        s.parse::<IpAddr>()
            .map(Self::from_ip)
            .map_err(|_| Error::InvalidEndpoint(s.to_string()))
    }
}

impl TryFrom<String> for Endpoint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.to_string()
    }
}
