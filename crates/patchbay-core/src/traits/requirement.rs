// # Requirement Trait
//
// Defines the interface for conditions a patch must satisfy.
//
// ## Implementations
//
// - Replication: `requirement::Replication`
// - Future: quorum per zone, latency budgets, etc.
//
// ## Usage
//
// ```rust,ignore
// use patchbay_core::Requirement;
//
// for requirement in patch.requirements() {
//     if !requirement.validate(&patch).await {
//         println!("unmet: {}", requirement.name());
//     }
// }
// ```

use crate::error::{Error, Result};
use crate::model::OutJack;
use crate::patch::Patch;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for patch requirements
///
/// A requirement is a pure predicate over its patch. The patch is passed by
/// reference at evaluation time, so a requirement never owns or outlives it.
///
/// `validate` has no default body: a requirement kind without a rule cannot
/// be constructed, so none can pass silently.
///
/// ## Allowed
/// - Reading the patch, including live health via `Patch::healthy_outputs()`
/// - Reading a health snapshot handed in through `validate_with`
///
/// ## Forbidden
/// - Mutating the patch or its jacks
/// - Caching health between calls
/// - Retrying probes (probes own their own latency bounds)
#[async_trait]
pub trait Requirement: Send + Sync {
    /// Requirement kind name (e.g. "replication")
    fn name(&self) -> &str;

    /// Whether the patch currently satisfies this requirement
    async fn validate(&self, patch: &Patch) -> bool;

    /// Whether the patch satisfies this requirement given `healthy`, a
    /// `healthy_outputs()` snapshot the caller already took
    ///
    /// Requirements that read output health must answer from `healthy` and
    /// not probe again. The default ignores the snapshot.
    async fn validate_with(&self, patch: &Patch, healthy: &[&OutJack]) -> bool {
        let _ = healthy;
        self.validate(patch).await
    }
}

/// Named parameters supplied to a requirement factory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementOptions(serde_json::Map<String, serde_json::Value>);

impl RequirementOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw option value
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Read a non-negative integer option
    ///
    /// Returns `Ok(None)` when absent or null, and `Error::InvalidOption` when
    /// present with any other shape.
    pub fn get_u64(&self, requirement: &str, key: &str) -> Result<Option<u64>> {
        match self.0.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                Error::invalid_option(
                    requirement,
                    format!("{} must be a non-negative integer, got {}", key, value),
                )
            }),
        }
    }
}

/// Helper trait for constructing requirements from options
pub trait RequirementFactory: Send + Sync {
    /// Create a requirement instance from its options
    fn create(&self, options: &RequirementOptions) -> Result<Box<dyn Requirement>>;
}
