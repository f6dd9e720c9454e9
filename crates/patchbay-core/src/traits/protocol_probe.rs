// # Protocol Probe Trait
//
// Per-protocol health strategy for output jacks.
//
// A protocol is a plain tag; the `ProtocolRegistry` maps each tag to a
// `ProtocolProbe`. The stock strategy (`probe::DefaultProtocolProbe`) is
// "host alive AND every endpoint requirement met". Endpoint requirements let
// a protocol carry extra conditions of its own, such as a database replica
// check, without a new probe type.

use crate::model::{Host, Port};
use async_trait::async_trait;

/// Health strategy for endpoints of one protocol
#[async_trait]
pub trait ProtocolProbe: Send + Sync {
    /// Whether the endpoint at `host:port` is currently healthy
    ///
    /// Must resolve to `false` rather than error or hang.
    async fn healthy(&self, host: &Host, port: Port) -> bool;
}

/// A composable condition a protocol places on each of its endpoints
#[async_trait]
pub trait EndpointRequirement: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Whether the endpoint satisfies this condition right now
    async fn check(&self, host: &Host, port: Port) -> bool;
}
