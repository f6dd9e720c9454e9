// # Network Addresses
//
// Validated value types for the two halves of an endpoint address.
//
// - `Host`: an IP literal or an RFC 1035 domain name
// - `Port`: a transport port in 0..=65535
//
// Both are smart constructors: once a value exists it is well-formed.
// Liveness is not a property of the value; it is answered by a `HostProbe`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Maximum total length of a domain name (RFC 1035)
const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single domain label (RFC 1035)
const MAX_LABEL_LEN: usize = 63;

/// A validated network host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Host {
    /// IPv4 or IPv6 literal
    Ip(IpAddr),
    /// Domain name, stored lowercase
    Name(String),
}

impl Host {
    /// Parse a host from an IP literal or a domain name
    ///
    /// Bracketed IPv6 (`[::1]`) is accepted. Domain names are compared
    /// case-insensitively and stored lowercase.
    ///
    /// # Example
    ///
    /// ```rust
    /// use patchbay_core::Host;
    ///
    /// assert!(Host::parse("db1.internal").is_ok());
    /// assert!(Host::parse("[::1]").is_ok());
    /// assert!(Host::parse("bad_host!").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        let unbracketed = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(trimmed);

        if let Ok(ip) = unbracketed.parse::<IpAddr>() {
            return Ok(Host::Ip(ip));
        }

        // Fully qualified form: one trailing root dot
        let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
        validate_domain_name(name)?;
        Ok(Host::Name(name.to_ascii_lowercase()))
    }

    /// Return the IP literal, if this host is one
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Host::Ip(ip) => Some(*ip),
            Host::Name(_) => None,
        }
    }
}

fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::invalid_host("host cannot be empty"));
    }

    if domain.len() > MAX_DOMAIN_LEN {
        return Err(Error::invalid_host(format!(
            "domain name too long: {} chars (max {})",
            domain.len(),
            MAX_DOMAIN_LEN
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(Error::invalid_host(format!(
                "domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(Error::invalid_host(format!(
                "domain label too long: {} chars (max {}). Label: '{}'",
                label.len(),
                MAX_LABEL_LEN,
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::invalid_host(format!(
                "domain label contains invalid characters: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::invalid_host(format!(
                "domain label cannot start or end with hyphen: '{}'",
                label
            )));
        }
    }

    Ok(())
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ip(IpAddr::V6(ip)) => write!(f, "[{}]", ip),
            Host::Ip(ip) => write!(f, "{}", ip),
            Host::Name(name) => f.write_str(name),
        }
    }
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Host::parse(s)
    }
}

impl TryFrom<String> for Host {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Host::parse(&value)
    }
}

impl From<Host> for String {
    fn from(host: Host) -> Self {
        host.to_string()
    }
}

impl From<IpAddr> for Host {
    fn from(ip: IpAddr) -> Self {
        Host::Ip(ip)
    }
}

/// A transport port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Construct a port, rejecting values outside 0..=65535
    pub fn new(value: i64) -> Result<Self> {
        u16::try_from(value)
            .map(Port)
            .map_err(|_| Error::InvalidPort(value))
    }

    /// The numeric port value
    pub fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Port(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl TryFrom<i64> for Port {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Port::new(value)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
