// # Replication Requirement
//
// Satisfied when a patch has at least `number_of_replicants` healthy outputs.
//
// ## Options
//
// - `number_of_replicants`: non-negative integer, default 3
//
// Every `validate` probes every output of the patch. `validate_with` reads
// the caller's snapshot instead.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::model::OutJack;
use crate::patch::Patch;
use crate::traits::{Requirement, RequirementFactory, RequirementOptions};

/// Default minimum count of healthy outputs
pub const DEFAULT_NUMBER_OF_REPLICANTS: usize = 3;

/// Option key for the minimum count
pub const NUMBER_OF_REPLICANTS: &str = "number_of_replicants";

const KIND: &str = "replication";

/// Minimum healthy-output count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replication {
    number_of_replicants: usize,
}

impl Replication {
    /// Require at least `number_of_replicants` healthy outputs
    pub fn new(number_of_replicants: usize) -> Self {
        Self {
            number_of_replicants,
        }
    }

    /// Build from options, defaulting to three replicants
    pub fn from_options(options: &RequirementOptions) -> Result<Self> {
        let number_of_replicants = options
            .get_u64(KIND, NUMBER_OF_REPLICANTS)?
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .unwrap_or(DEFAULT_NUMBER_OF_REPLICANTS);

        Ok(Self::new(number_of_replicants))
    }

    /// The minimum count of healthy outputs
    pub fn number_of_replicants(&self) -> usize {
        self.number_of_replicants
    }
}

impl Default for Replication {
    fn default() -> Self {
        Self::new(DEFAULT_NUMBER_OF_REPLICANTS)
    }
}

#[async_trait]
impl Requirement for Replication {
    fn name(&self) -> &str {
        KIND
    }

    async fn validate(&self, patch: &Patch) -> bool {
        let healthy = patch.healthy_outputs().await;
        self.validate_with(patch, &healthy).await
    }

    async fn validate_with(&self, patch: &Patch, healthy: &[&OutJack]) -> bool {
        debug!("Patch {}: {} healthy output(s), {} required",
               patch.name(), healthy.len(), self.number_of_replicants);
        self.number_of_replicants <= healthy.len()
    }
}

/// Factory for creating replication requirements
pub struct ReplicationFactory;

impl RequirementFactory for ReplicationFactory {
    fn create(&self, options: &RequirementOptions) -> Result<Box<dyn Requirement>> {
        Ok(Box::new(Replication::from_options(options)?))
    }
}
