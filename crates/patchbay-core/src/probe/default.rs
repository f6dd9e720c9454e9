// # Default Protocol Probe
//
// The stock health strategy every protocol starts from:
//
//   healthy(host, port) = host_probe.is_alive(host) AND unmet_requirements(host, port) is empty
//
// Both halves are always evaluated. Endpoint requirements run concurrently.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::model::{Host, Port};
use crate::traits::{EndpointRequirement, HostProbe, ProtocolProbe};

/// Host liveness plus per-protocol endpoint requirements
pub struct DefaultProtocolProbe {
    /// Liveness source for hosts
    host_probe: Arc<dyn HostProbe>,

    /// Conditions this protocol places on each endpoint
    requirements: Vec<Arc<dyn EndpointRequirement>>,

    /// Upper bound on a single liveness call
    timeout: Option<Duration>,
}

impl DefaultProtocolProbe {
    /// Create a probe with no endpoint requirements and no timeout
    pub fn new(host_probe: Arc<dyn HostProbe>) -> Self {
        Self {
            host_probe,
            requirements: Vec::new(),
            timeout: None,
        }
    }

    /// Add an endpoint requirement
    pub fn with_requirement(mut self, requirement: Arc<dyn EndpointRequirement>) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Bound the host liveness call; elapsing counts as not alive
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Endpoint requirements not met by `host:port`, in declaration order
    pub async fn unmet_requirements(&self, host: &Host, port: Port) -> Vec<&dyn EndpointRequirement> {
        let checks = join_all(self.requirements.iter().map(|r| r.check(host, port))).await;

        self.requirements
            .iter()
            .zip(checks)
            .filter(|(_, met)| !met)
            .map(|(requirement, _)| requirement.as_ref())
            .collect()
    }

    async fn host_alive(&self, host: &Host) -> bool {
        let Some(limit) = self.timeout else {
            return self.host_probe.is_alive(host).await;
        };

        match tokio::time::timeout(limit, self.host_probe.is_alive(host)).await {
            Ok(alive) => alive,
            Err(_) => {
                warn!("{} probe for {} timed out after {:?}",
                      self.host_probe.probe_name(), host, limit);
                false
            }
        }
    }
}

#[async_trait]
impl ProtocolProbe for DefaultProtocolProbe {
    async fn healthy(&self, host: &Host, port: Port) -> bool {
        let (alive, unmet) = tokio::join!(self.host_alive(host), self.unmet_requirements(host, port));

        if !unmet.is_empty() {
            let names: Vec<&str> = unmet.iter().map(|r| r.name()).collect();
            debug!("{}:{} fails endpoint requirements {:?}", host, port, names);
        }

        alive && unmet.is_empty()
    }
}
