// # Jacks
//
// A jack is one network endpoint in a patch: host, port and protocol.
//
// Fields are optional because a jack may be built from raw input that did
// not parse. Such a jack still exists and still belongs to its patch; it just
// fails `validate()` and shows up in `Patch::bad_jacks()`.
//
// - `InJack`: an input endpoint, validity only
// - `OutJack`: an output endpoint, which also reports live health

use crate::model::{Host, Port, Protocol};
use crate::registry::ProtocolRegistry;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Host, port and protocol of a single endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    /// Validated host, absent if the input was malformed
    pub host: Option<Host>,
    /// Validated port, absent if the input was out of range
    pub port: Option<Port>,
    /// Protocol tag, absent if unknown or unset
    pub protocol: Option<Protocol>,
}

impl Endpoint {
    /// Create a fully specified endpoint
    pub fn new(host: Host, port: Port, protocol: Protocol) -> Self {
        Self {
            host: Some(host),
            port: Some(port),
            protocol: Some(protocol),
        }
    }

    /// Build an endpoint from raw values
    ///
    /// A field that does not parse is left empty and logged. This never fails:
    /// structural problems surface later through `validate()`.
    pub fn parse(host: &str, port: i64, protocol: &str) -> Self {
        let host = Host::parse(host)
            .inspect_err(|e| warn!("Dropping malformed host {:?}: {}", host, e))
            .ok();
        let port = Port::new(port)
            .inspect_err(|e| warn!("Dropping port: {}", e))
            .ok();
        let protocol = protocol
            .parse::<Protocol>()
            .inspect_err(|e| warn!("Dropping protocol: {}", e))
            .ok();

        Self {
            host,
            port,
            protocol,
        }
    }

    /// True iff host, port and protocol are all present
    pub fn validate(&self) -> bool {
        self.host.is_some() && self.port.is_some() && self.protocol.is_some()
    }

    /// Structural reasons this endpoint is invalid, empty iff `validate()`
    pub fn defects(&self) -> Vec<JackDefect> {
        let mut defects = Vec::new();
        if self.host.is_none() {
            defects.push(JackDefect::MissingHost);
        }
        if self.port.is_none() {
            defects.push(JackDefect::MissingPort);
        }
        if self.protocol.is_none() {
            defects.push(JackDefect::MissingProtocol);
        }
        defects
    }
}

/// Why a jack was rejected by a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum JackDefect {
    /// Host missing or malformed
    MissingHost,
    /// Port missing or out of range
    MissingPort,
    /// Protocol missing or unknown
    MissingProtocol,
    /// Jack speaks a different protocol than its patch
    ProtocolMismatch {
        expected: Protocol,
        found: Protocol,
    },
}

/// Direction of a jack within a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JackKind {
    In,
    Out,
}

/// Capability shared by input and output jacks
pub trait Jack {
    /// The endpoint this jack points at
    fn endpoint(&self) -> &Endpoint;

    /// Input or output
    fn kind(&self) -> JackKind;

    /// Protocol tag, if set
    fn protocol(&self) -> Option<Protocol> {
        self.endpoint().protocol
    }

    /// Structural well-formedness: host, port and protocol all valid
    fn validate(&self) -> bool {
        self.endpoint().validate()
    }
}

/// An input jack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InJack {
    endpoint: Endpoint,
}

impl InJack {
    /// Create an input jack from a fully specified endpoint
    pub fn new(host: Host, port: Port, protocol: Protocol) -> Self {
        Self::from_endpoint(Endpoint::new(host, port, protocol))
    }

    /// Create an input jack from raw values (see [`Endpoint::parse`])
    pub fn parse(host: &str, port: i64, protocol: &str) -> Self {
        Self::from_endpoint(Endpoint::parse(host, port, protocol))
    }

    /// Wrap an existing endpoint
    pub fn from_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

impl Jack for InJack {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn kind(&self) -> JackKind {
        JackKind::In
    }
}

/// An output jack
///
/// Only output jacks report health. `returns` carries whatever the caller
/// wants to associate with this output (role, shard, weight, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutJack {
    endpoint: Endpoint,
    returns: Option<serde_json::Value>,
}

impl OutJack {
    /// Create an output jack from a fully specified endpoint
    pub fn new(host: Host, port: Port, protocol: Protocol) -> Self {
        Self::from_endpoint(Endpoint::new(host, port, protocol))
    }

    /// Create an output jack from raw values (see [`Endpoint::parse`])
    pub fn parse(host: &str, port: i64, protocol: &str) -> Self {
        Self::from_endpoint(Endpoint::parse(host, port, protocol))
    }

    /// Wrap an existing endpoint
    pub fn from_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            returns: None,
        }
    }

    /// Attach associated return metadata
    pub fn with_returns(mut self, returns: serde_json::Value) -> Self {
        self.returns = Some(returns);
        self
    }

    /// Associated return metadata, if any
    pub fn returns(&self) -> Option<&serde_json::Value> {
        self.returns.as_ref()
    }

    /// Probe this output's live health
    ///
    /// Delegates to the probe registered for the jack's protocol. A jack
    /// missing any field is unhealthy without being probed, and so is a jack
    /// whose protocol has no probe. Nothing is cached: every call probes.
    pub async fn healthy(&self, probes: &ProtocolRegistry) -> bool {
        let Endpoint {
            host: Some(host),
            port: Some(port),
            protocol: Some(protocol),
        } = &self.endpoint
        else {
            debug!("Output jack is incomplete, reporting unhealthy");
            return false;
        };

        match probes.probe_for(*protocol) {
            Some(probe) => {
                let healthy = probe.healthy(host, *port).await;
                debug!("Probed {}:{} ({}): healthy={}", host, port, protocol, healthy);
                healthy
            }
            None => {
                warn!("No probe registered for protocol {}, reporting {}:{} unhealthy",
                      protocol, host, port);
                false
            }
        }
    }
}

impl Jack for OutJack {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn kind(&self) -> JackKind {
        JackKind::Out
    }
}

/// Borrowed view over either kind of jack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JackRef<'a> {
    In(&'a InJack),
    Out(&'a OutJack),
}

impl Jack for JackRef<'_> {
    fn endpoint(&self) -> &Endpoint {
        match self {
            JackRef::In(jack) => jack.endpoint(),
            JackRef::Out(jack) => jack.endpoint(),
        }
    }

    fn kind(&self) -> JackKind {
        match self {
            JackRef::In(_) => JackKind::In,
            JackRef::Out(_) => JackKind::Out,
        }
    }
}
