//! Test doubles and common utilities for contract tests
//!
//! These doubles stand in for the external liveness layer: they answer from
//! a table the test controls and count every probe they receive.

#![allow(dead_code)]

use async_trait::async_trait;
use patchbay_core::probe::{DefaultProtocolProbe, MemoryHostProbe};
use patchbay_core::{Host, HostProbe, ProtocolRegistry};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A host probe backed by a liveness table that counts calls
#[derive(Clone)]
pub struct CountingHostProbe {
    /// Liveness the test controls
    table: MemoryHostProbe,
    /// Call counter for is_alive()
    calls: Arc<AtomicUsize>,
    /// Simulated probe latency
    latency: Option<Duration>,
}

impl CountingHostProbe {
    pub fn new() -> Self {
        Self {
            table: MemoryHostProbe::new(),
            calls: Arc::new(AtomicUsize::new(0)),
            latency: None,
        }
    }

    /// Make every probe take `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Mark a host up or down
    pub async fn set_alive(&self, host: &str, alive: bool) {
        self.table.set_alive(host_of(host), alive).await;
    }

    /// Get the number of times is_alive() was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostProbe for CountingHostProbe {
    async fn is_alive(&self, host: &Host) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.table.is_alive(host).await
    }

    fn probe_name(&self) -> &'static str {
        "counting"
    }
}

/// Registry whose default probe is host liveness through `probe`
pub fn registry_with(probe: &CountingHostProbe) -> Arc<ProtocolRegistry> {
    Arc::new(
        ProtocolRegistry::new()
            .with_default_probe(Arc::new(DefaultProtocolProbe::new(Arc::new(probe.clone())))),
    )
}

/// Parse a host that the test knows is well formed
pub fn host_of(name: &str) -> Host {
    Host::parse(name).expect("test host is well formed")
}
