// # Protocols
//
// A protocol names the family of service an endpoint speaks. It is a plain
// tag: equality is by variant, and the health-probe strategy for each tag
// lives in the `ProtocolRegistry`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Service protocol spoken by a jack or governing a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Untyped endpoint
    Base,
    /// HTTP web service
    Http,
    /// Log sink
    Log,
    /// Redis
    Redis,
    /// Memcached
    Memcached,
    /// MySQL
    Mysql,
}

/// Coarse grouping of protocols, for documentation and dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolFamily {
    Base,
    Service,
    Database,
}

impl Protocol {
    /// Every protocol variant, in declaration order
    pub const ALL: [Protocol; 6] = [
        Protocol::Base,
        Protocol::Http,
        Protocol::Log,
        Protocol::Redis,
        Protocol::Memcached,
        Protocol::Mysql,
    ];

    /// The family this protocol belongs to
    pub fn family(self) -> ProtocolFamily {
        match self {
            Protocol::Base => ProtocolFamily::Base,
            Protocol::Http => ProtocolFamily::Service,
            Protocol::Log | Protocol::Redis | Protocol::Memcached | Protocol::Mysql => {
                ProtocolFamily::Database
            }
        }
    }

    /// Lowercase name used in configuration and logs
    pub fn name(self) -> &'static str {
        match self {
            Protocol::Base => "base",
            Protocol::Http => "http",
            Protocol::Log => "log",
            Protocol::Redis => "redis",
            Protocol::Memcached => "memcached",
            Protocol::Mysql => "mysql",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Protocol::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::unknown_protocol(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        assert_eq!(Protocol::Http.family(), ProtocolFamily::Service);
        assert_eq!(Protocol::Mysql.family(), ProtocolFamily::Database);
        assert_eq!(Protocol::Log.family(), ProtocolFamily::Database);
        assert_eq!(Protocol::Base.family(), ProtocolFamily::Base);
    }

    #[test]
    fn test_parse_names() {
        for protocol in Protocol::ALL {
            assert_eq!(protocol.name().parse::<Protocol>().unwrap(), protocol);
        }
        assert_eq!("Redis".parse::<Protocol>().unwrap(), Protocol::Redis);
        assert!(matches!(
            "postgres".parse::<Protocol>(),
            Err(Error::UnknownProtocol(_))
        ));
    }

    #[test]
    fn test_equality_is_by_variant() {
        assert_ne!(Protocol::Redis, Protocol::Memcached);
        assert_eq!(Protocol::Redis.family(), Protocol::Memcached.family());
    }
}
