//! Configuration types for the patchbay system
//!
//! A `PatchConfig` is the declarative (JSON) form of a patch. Building it
//! turns raw jack fields into validated values: a malformed host, an
//! out-of-range port or an unknown jack protocol does not fail the build.
//! The jack is kept with that field empty, so `Patch::bad_jacks()` reports it.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Endpoint, InJack, OutJack, Protocol};
use crate::patch::Patch;
use crate::registry::{ProtocolRegistry, RequirementRegistry};
use crate::traits::RequirementOptions;

/// Declarative patch description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Patch name
    pub name: String,

    /// Governing protocol name (e.g. "redis")
    pub protocol: String,

    /// Input jacks
    #[serde(default)]
    pub inputs: Vec<JackConfig>,

    /// Output jacks
    #[serde(default)]
    pub outputs: Vec<OutJackConfig>,

    /// Requirements
    #[serde(default)]
    pub requirements: Vec<RequirementConfig>,
}

impl PatchConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading patch configuration from {}", path.display());
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("Patch name cannot be empty"));
        }

        if self.outputs.is_empty() {
            return Err(Error::config(format!(
                "Patch {} declares no outputs",
                self.name
            )));
        }

        Ok(())
    }

    /// Build a patch
    ///
    /// # Parameters
    ///
    /// - `requirements`: factories for the configured requirement kinds
    /// - `probes`: health probes the patch will use
    ///
    /// # Returns
    ///
    /// - `Ok(Patch)`: the built patch (possibly with structurally bad jacks)
    /// - `Err(Error)`: invalid configuration, unknown patch protocol, or a
    ///   requirement that could not be constructed
    pub fn build(
        &self,
        requirements: &RequirementRegistry,
        probes: Arc<ProtocolRegistry>,
    ) -> Result<Patch> {
        self.validate()?;

        let protocol: Protocol = self.protocol.parse()?;
        let mut builder = Patch::builder(&self.name, protocol, probes);

        for input in &self.inputs {
            builder = builder.input(InJack::from_endpoint(input.endpoint(protocol)));
        }

        for output in &self.outputs {
            let mut jack = OutJack::from_endpoint(output.jack.endpoint(protocol));
            if let Some(returns) = &output.returns {
                jack = jack.with_returns(returns.clone());
            }
            builder = builder.output(jack);
        }

        for requirement in &self.requirements {
            builder = builder.boxed_requirement(requirements.create(requirement)?);
        }

        let patch = builder.build();
        debug!("Built patch {} ({}): {} input(s), {} output(s), {} requirement(s)",
               patch.name(), protocol, patch.inputs().len(), patch.outputs().len(),
               patch.requirements().len());
        Ok(patch)
    }
}

/// Raw jack fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JackConfig {
    /// Host name or IP literal
    pub host: String,

    /// Port number (validated on build)
    pub port: i64,

    /// Protocol name; the patch protocol when absent
    #[serde(default)]
    pub protocol: Option<String>,
}

impl JackConfig {
    /// Create a jack config that inherits the patch protocol
    pub fn new(host: impl Into<String>, port: i64) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: None,
        }
    }

    /// Set an explicit protocol
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    fn endpoint(&self, patch_protocol: Protocol) -> Endpoint {
        let protocol = self.protocol.as_deref().unwrap_or(patch_protocol.name());
        Endpoint::parse(&self.host, self.port, protocol)
    }
}

/// Raw output jack fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutJackConfig {
    /// Address and protocol
    #[serde(flatten)]
    pub jack: JackConfig,

    /// Associated return metadata
    #[serde(default)]
    pub returns: Option<serde_json::Value>,
}

/// Requirement kind plus its options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementConfig {
    /// Registered kind name (e.g. "replication")
    pub kind: String,

    /// Kind-specific options
    #[serde(default)]
    pub options: RequirementOptions,
}
