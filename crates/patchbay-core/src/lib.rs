// # patchbay-core
//
// Topology validation and health aggregation for service patches.
//
// ## Architecture Overview
//
// A patch wires input jacks to output jacks under one protocol and a set of
// requirements. This library answers whether that wiring is currently valid
// and healthy enough:
// - **Host / Port / Protocol**: validated endpoint building blocks
// - **InJack / OutJack**: endpoints; only outputs report live health
// - **HostProbe**: the "is this host alive" capability supplied by the caller
// - **ProtocolProbe**: per-protocol health strategy, looked up in the ProtocolRegistry
// - **Requirement**: pluggable patch conditions, e.g. Replication
// - **Patch**: the aggregate running the two-phase validation
//
// ## Design Principles
//
// 1. **Fail Closed**: malformed fields, missing probes and probe failures all read as `false`
// 2. **No Caching**: every validation is a fresh snapshot of live health
// 3. **Plugin-Based**: probes and requirement kinds are registered, not hardcoded
// 4. **No Transport**: the core never talks to the network itself

pub mod traits;
pub mod model;
pub mod probe;
pub mod requirement;
pub mod patch;
pub mod registry;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{EndpointRequirement, HostProbe, ProtocolProbe, Requirement, RequirementFactory, RequirementOptions};
pub use model::{Endpoint, Host, InJack, Jack, JackDefect, JackKind, JackRef, OutJack, Port, Protocol, ProtocolFamily};
pub use patch::{BadJack, Patch, PatchBuilder, ValidationReport};
pub use registry::{ProtocolRegistry, RequirementRegistry};
pub use config::{JackConfig, OutJackConfig, PatchConfig, RequirementConfig};
pub use error::{Error, Result};
