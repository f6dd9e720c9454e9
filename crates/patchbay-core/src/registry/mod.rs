//! Plugin-based registries
//!
//! Two registries keep protocol probes and requirement kinds pluggable,
//! avoiding hardcoded match arms over every variant:
//!
//! - [`ProtocolRegistry`]: maps each `Protocol` tag to its health probe
//! - [`RequirementRegistry`]: maps requirement kind names to factories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use patchbay_core::registry::{ProtocolRegistry, RequirementRegistry};
//!
//! let probes = ProtocolRegistry::new()
//!     .with_default_probe(Arc::new(DefaultProtocolProbe::new(host_probe)));
//! probes.register_probe(Protocol::Mysql, Arc::new(mysql_probe));
//!
//! let requirements = RequirementRegistry::with_builtin();
//! let patch = config.build(&requirements, Arc::new(probes))?;
//! ```

use crate::config::RequirementConfig;
use crate::error::{Error, Result};
use crate::model::Protocol;
use crate::requirement::ReplicationFactory;
use crate::traits::{ProtocolProbe, Requirement, RequirementFactory};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Protocol → health probe registry
///
/// ## Lookup
///
/// A probe registered for the exact protocol wins; otherwise the default
/// probe (if any) answers. A protocol with neither is never probed and its
/// jacks report unhealthy.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ProtocolRegistry {
    /// Probes registered per protocol
    probes: RwLock<HashMap<Protocol, Arc<dyn ProtocolProbe>>>,

    /// Fallback probe for protocols without their own
    default_probe: Option<Arc<dyn ProtocolProbe>>,
}

impl ProtocolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback probe used by protocols without their own
    pub fn with_default_probe(mut self, probe: Arc<dyn ProtocolProbe>) -> Self {
        self.default_probe = Some(probe);
        self
    }

    /// Register the probe for one protocol, replacing any previous one
    pub fn register_probe(&self, protocol: Protocol, probe: Arc<dyn ProtocolProbe>) {
        debug!("Registering probe for protocol {}", protocol);
        let mut probes = self.probes.write().unwrap_or_else(PoisonError::into_inner);
        probes.insert(protocol, probe);
    }

    /// Probe that answers for `protocol`
    ///
    /// # Returns
    ///
    /// - `Some(probe)`: the protocol's own probe, else the default probe
    /// - `None`: no probe can answer for this protocol
    pub fn probe_for(&self, protocol: Protocol) -> Option<Arc<dyn ProtocolProbe>> {
        let probes = self.probes.read().unwrap_or_else(PoisonError::into_inner);
        probes
            .get(&protocol)
            .cloned()
            .or_else(|| self.default_probe.clone())
    }

    /// Check if a probe is registered specifically for `protocol`
    pub fn has_probe(&self, protocol: Protocol) -> bool {
        let probes = self.probes.read().unwrap_or_else(PoisonError::into_inner);
        probes.contains_key(&protocol)
    }

    /// List protocols with a specifically registered probe
    pub fn list_protocols(&self) -> Vec<Protocol> {
        let probes = self.probes.read().unwrap_or_else(PoisonError::into_inner);
        let mut protocols: Vec<Protocol> = probes.keys().copied().collect();
        protocols.sort_by_key(|p| Protocol::ALL.iter().position(|q| q == p));
        protocols
    }
}

/// Requirement kind → factory registry
#[derive(Default)]
pub struct RequirementRegistry {
    /// Registered requirement factories
    factories: RwLock<HashMap<String, Box<dyn RequirementFactory>>>,
}

impl RequirementRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in requirement kinds
    ///
    /// Registers `"replication"`.
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register("replication", Box::new(ReplicationFactory));
        registry
    }

    /// Register a requirement factory under a kind name
    pub fn register(&self, kind: impl Into<String>, factory: Box<dyn RequirementFactory>) {
        let kind = kind.into();
        debug!("Registering requirement kind {}", kind);
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        factories.insert(kind, factory);
    }

    /// Create a requirement from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Requirement>)`: Created requirement
    /// - `Err(Error)`: If the kind is not registered or its options are invalid
    pub fn create(&self, config: &RequirementConfig) -> Result<Box<dyn Requirement>> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);

        let factory = factories
            .get(&config.kind)
            .ok_or_else(|| Error::unknown_requirement(&config.kind))?;

        factory.create(&config.options)
    }

    /// Check if a requirement kind is registered
    pub fn has_kind(&self, kind: &str) -> bool {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        factories.contains_key(kind)
    }

    /// List all registered requirement kinds, sorted by name
    pub fn list_kinds(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        let mut kinds: Vec<String> = factories.keys().cloned().collect();
        kinds.sort();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Host, Port};
    use crate::traits::RequirementOptions;

    struct FixedProbe(bool);

    #[async_trait::async_trait]
    impl ProtocolProbe for FixedProbe {
        async fn healthy(&self, _host: &Host, _port: Port) -> bool {
            self.0
        }
    }

    #[tokio::test]
    async fn test_probe_lookup_falls_back_to_default() {
        let registry = ProtocolRegistry::new().with_default_probe(Arc::new(FixedProbe(false)));
        registry.register_probe(Protocol::Redis, Arc::new(FixedProbe(true)));

        let host = Host::parse("cache1").unwrap();
        let port = Port::from(6379);

        let redis = registry.probe_for(Protocol::Redis).unwrap();
        assert!(redis.healthy(&host, port).await);

        let http = registry.probe_for(Protocol::Http).unwrap();
        assert!(!http.healthy(&host, port).await);

        assert!(registry.has_probe(Protocol::Redis));
        assert!(!registry.has_probe(Protocol::Http));
        assert_eq!(registry.list_protocols(), vec![Protocol::Redis]);
    }

    #[test]
    fn test_empty_registry_has_no_probe() {
        let registry = ProtocolRegistry::new();
        assert!(registry.probe_for(Protocol::Mysql).is_none());
    }

    #[test]
    fn test_requirement_registration() {
        let registry = RequirementRegistry::new();

        // Initially empty
        assert!(!registry.has_kind("replication"));

        let builtin = RequirementRegistry::with_builtin();
        assert!(builtin.has_kind("replication"));
        assert_eq!(builtin.list_kinds(), vec!["replication".to_string()]);

        let created = builtin
            .create(&RequirementConfig {
                kind: "replication".to_string(),
                options: RequirementOptions::new().with("number_of_replicants", 2),
            })
            .unwrap();
        assert_eq!(created.name(), "replication");
    }

    #[test]
    fn test_list_kinds_is_sorted() {
        let registry = RequirementRegistry::with_builtin();
        registry.register("zone_quorum", Box::new(ReplicationFactory));
        registry.register("latency_budget", Box::new(ReplicationFactory));

        assert_eq!(
            registry.list_kinds(),
            vec!["latency_budget", "replication", "zone_quorum"]
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let registry = RequirementRegistry::with_builtin();
        let result = registry.create(&RequirementConfig {
            kind: "quorum".to_string(),
            options: RequirementOptions::new(),
        });
        assert!(matches!(result, Err(Error::UnknownRequirement(ref k)) if k == "quorum"));
    }
}
