//! Core traits for the patchbay system
//!
//! This module defines the extension points callers plug into.
//!
//! - [`HostProbe`]: Answer whether a host is alive
//! - [`ProtocolProbe`]: Per-protocol endpoint health strategy
//! - [`EndpointRequirement`]: Extra per-endpoint conditions a protocol carries
//! - [`Requirement`]: Conditions a whole patch must satisfy

pub mod host_probe;
pub mod protocol_probe;
pub mod requirement;

pub use host_probe::HostProbe;
pub use protocol_probe::{EndpointRequirement, ProtocolProbe};
pub use requirement::{Requirement, RequirementFactory, RequirementOptions};
