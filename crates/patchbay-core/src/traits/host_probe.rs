// # Host Probe Trait
//
// Defines the "is this host alive" capability the core depends on.
//
// ## Implementations
//
// - In-memory liveness table: `probe::MemoryHostProbe`
// - External: ICMP ping, DNS resolution, service-discovery health APIs
//
// ## Usage
//
// ```rust,ignore
// use patchbay_core::{Host, HostProbe};
//
// let probe = /* HostProbe implementation */;
// let host = Host::parse("db1.internal")?;
//
// if probe.is_alive(&host).await {
//     println!("{} answers", host);
// }
// ```

use crate::model::Host;
use async_trait::async_trait;

/// Trait for host liveness probes
///
/// # Contract
///
/// `is_alive` always resolves to a boolean. A probe that cannot reach the
/// host, times out, or hits any internal failure answers `false`. It never
/// panics and never blocks indefinitely: latency bounds are the probe's
/// responsibility.
///
/// ## Allowed
/// - Network or platform I/O needed to answer a single liveness question
/// - Reading externally maintained liveness state
///
/// ## Forbidden
/// - Caching answers across calls (every validation is a fresh snapshot)
/// - Background polling loops
/// - Knowledge of patches, jacks or requirements
///
/// # Thread Safety
///
/// Implementations must be usable concurrently from many tasks: output
/// health checks fan out across every output of a patch at once.
#[async_trait]
pub trait HostProbe: Send + Sync {
    /// Whether the host currently answers
    async fn is_alive(&self, host: &Host) -> bool;

    /// Probe name (for logging/debugging)
    fn probe_name(&self) -> &'static str;
}
