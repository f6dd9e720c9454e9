// # Memory Host Probe
//
// In-memory implementation of HostProbe.
//
// ## Purpose
//
// Answers liveness from a table that something else keeps current: a
// service-discovery watcher, a monitoring webhook, or a test. It performs no
// I/O of its own.
//
// ## Semantics
//
// - Unknown hosts are not alive
// - Clones share the same table
// - Updates are visible to the next probe call; nothing is cached per patch

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use async_trait::async_trait;

use crate::model::Host;
use crate::traits::HostProbe;

/// In-memory host liveness table
///
/// # Example
///
/// ```rust,no_run
/// use patchbay_core::probe::MemoryHostProbe;
/// use patchbay_core::{Host, HostProbe};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let probe = MemoryHostProbe::new();
///     let host = Host::parse("db1.internal")?;
///
///     probe.set_alive(host.clone(), true).await;
///     assert!(probe.is_alive(&host).await);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHostProbe {
    inner: Arc<RwLock<HashMap<Host, bool>>>,
}

impl MemoryHostProbe {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the liveness of a host
    pub async fn set_alive(&self, host: Host, alive: bool) {
        let mut guard = self.inner.write().await;
        guard.insert(host, alive);
    }

    /// Forget a host (it becomes not alive)
    pub async fn forget(&self, host: &Host) {
        let mut guard = self.inner.write().await;
        guard.remove(host);
    }

    /// Forget every host
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.clear();
    }

    /// Get the number of hosts in the table
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the table is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl HostProbe for MemoryHostProbe {
    async fn is_alive(&self, host: &Host) -> bool {
        let guard = self.inner.read().await;
        guard.get(host).copied().unwrap_or(false)
    }

    fn probe_name(&self) -> &'static str {
        "memory"
    }
}
