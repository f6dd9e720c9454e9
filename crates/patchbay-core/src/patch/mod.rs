//! Patch validation
//!
//! A `Patch` wires input jacks to output jacks under one protocol and a set of
//! requirements, and answers: "is this wiring currently valid and healthy
//! enough?"
//!
//! ## Architecture
//!
//! ```text
//!                      ┌──────────────┐
//!   InJack / OutJack ─▶│    Patch     │◀─ Box<dyn Requirement>
//!                      └──────────────┘
//!                             │
//!          ┌──────────────────┼──────────────────┐
//!          │                  │                  │
//!          ▼                  ▼                  ▼
//!   ┌─────────────┐   ┌───────────────┐   ┌──────────────┐
//!   │  bad_jacks  │   │    unmet_     │   │   healthy_   │
//!   │ (structure) │   │ requirements  │──▶│   outputs    │
//!   └─────────────┘   └───────────────┘   └──────────────┘
//!                                                │
//!                                                ▼
//!                                        ProtocolRegistry
//!                                        → ProtocolProbe
//!                                        → HostProbe
//! ```
//!
//! ## Validation
//!
//! 1. Structural phase: every jack is well formed and speaks the patch protocol
//! 2. Requirement phase: every requirement is satisfied, probing outputs as needed
//!
//! `validate()` is the conjunction of both phases and always evaluates both.
//! Nothing is cached: each call is a fresh snapshot of live health.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{InJack, Jack, JackDefect, JackKind, JackRef, OutJack, Protocol};
use crate::registry::ProtocolRegistry;
use crate::traits::Requirement;

/// A validated aggregate of jacks, protocol and requirements
pub struct Patch {
    /// Name used in logs and reports
    name: String,

    /// Protocol every jack must speak
    protocol: Protocol,

    /// Input jacks
    inputs: Vec<InJack>,

    /// Output jacks
    outputs: Vec<OutJack>,

    /// Conditions the patch must satisfy
    requirements: Vec<Box<dyn Requirement>>,

    /// Health probes per protocol
    probes: Arc<ProtocolRegistry>,
}

impl Patch {
    /// Start building a patch
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use patchbay_core::{OutJack, Patch, Protocol, ProtocolRegistry};
    /// use patchbay_core::requirement::Replication;
    ///
    /// # async fn demo() {
    /// let patch = Patch::builder("web", Protocol::Http, Arc::new(ProtocolRegistry::new()))
    ///     .output(OutJack::parse("web1.internal", 8080, "http"))
    ///     .requirement(Replication::new(1))
    ///     .build();
    ///
    /// let valid = patch.validate().await;
    /// # }
    /// ```
    pub fn builder(
        name: impl Into<String>,
        protocol: Protocol,
        probes: Arc<ProtocolRegistry>,
    ) -> PatchBuilder {
        PatchBuilder {
            patch: Patch {
                name: name.into(),
                protocol,
                inputs: Vec::new(),
                outputs: Vec::new(),
                requirements: Vec::new(),
                probes,
            },
        }
    }

    /// Patch name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Governing protocol
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Input jacks, in declaration order
    pub fn inputs(&self) -> &[InJack] {
        &self.inputs
    }

    /// Output jacks, in declaration order
    pub fn outputs(&self) -> &[OutJack] {
        &self.outputs
    }

    /// Requirements, in declaration order
    pub fn requirements(&self) -> &[Box<dyn Requirement>] {
        &self.requirements
    }

    /// Probe registry used for output health
    pub fn probes(&self) -> &ProtocolRegistry {
        &self.probes
    }

    /// Whether the patch is valid right now
    ///
    /// True iff `bad_jacks()` and `unmet_requirements()` are both empty.
    /// Both are evaluated even when the first already fails.
    pub async fn validate(&self) -> bool {
        let bad_jacks = self.bad_jacks();
        let unmet = self.unmet_requirements().await;

        let valid = bad_jacks.is_empty() && unmet.is_empty();
        info!("Patch {} validated: valid={} bad_jacks={} unmet_requirements={}",
              self.name, valid, bad_jacks.len(), unmet.len());
        valid
    }

    /// Whether a jack is well formed and speaks the patch protocol
    pub fn jack_matches_protocol<J: Jack + ?Sized>(&self, jack: &J) -> bool {
        jack.validate() && jack.protocol() == Some(self.protocol)
    }

    /// Every reason a jack is rejected by this patch
    ///
    /// Empty iff `jack_matches_protocol(jack)`.
    pub fn jack_defects<J: Jack + ?Sized>(&self, jack: &J) -> Vec<JackDefect> {
        let mut defects = jack.endpoint().defects();
        if let Some(found) = jack.protocol()
            && found != self.protocol
        {
            defects.push(JackDefect::ProtocolMismatch {
                expected: self.protocol,
                found,
            });
        }
        defects
    }

    /// Jacks that fail `jack_matches_protocol`, inputs first, then outputs
    pub fn bad_jacks(&self) -> Vec<JackRef<'_>> {
        let bad: Vec<JackRef<'_>> = self
            .inputs
            .iter()
            .map(JackRef::In)
            .chain(self.outputs.iter().map(JackRef::Out))
            .filter(|jack| !self.jack_matches_protocol(jack))
            .collect();

        if !bad.is_empty() {
            debug!("Patch {} has {} bad jack(s)", self.name, bad.len());
        }
        bad
    }

    /// Requirements that currently report unsatisfied, in declaration order
    ///
    /// Requirements are evaluated concurrently; each may probe outputs.
    pub async fn unmet_requirements(&self) -> Vec<&dyn Requirement> {
        let results = join_all(self.requirements.iter().map(|r| r.validate(self))).await;

        self.requirements
            .iter()
            .zip(results)
            .filter(|(_, met)| !met)
            .map(|(requirement, _)| requirement.as_ref())
            .collect()
    }

    /// Requirements unmet against one `healthy_outputs()` snapshot
    async fn unmet_requirements_with(&self, healthy: &[&OutJack]) -> Vec<&dyn Requirement> {
        let results = join_all(
            self.requirements
                .iter()
                .map(|r| r.validate_with(self, healthy)),
        )
        .await;

        self.requirements
            .iter()
            .zip(results)
            .filter(|(_, met)| !met)
            .map(|(requirement, _)| requirement.as_ref())
            .collect()
    }

    /// Outputs that are healthy right now, in declaration order
    ///
    /// Probes every output concurrently on every call. Callers that need a
    /// stable snapshot must keep the returned list.
    pub async fn healthy_outputs(&self) -> Vec<&OutJack> {
        let results = join_all(self.outputs.iter().map(|o| o.healthy(&self.probes))).await;

        self.outputs
            .iter()
            .zip(results)
            .filter(|(_, healthy)| *healthy)
            .map(|(output, _)| output)
            .collect()
    }

    /// Full diagnostic snapshot
    ///
    /// Each bad jack carries its reasons, including protocol mismatches.
    /// Outputs are probed once; requirements are judged against that same
    /// health snapshot, so the healthy count and `valid` always agree.
    pub async fn report(&self) -> ValidationReport {
        let bad_jacks: Vec<BadJack> = self
            .inputs
            .iter()
            .enumerate()
            .map(|(index, jack)| (JackKind::In, index, self.jack_defects(jack)))
            .chain(
                self.outputs
                    .iter()
                    .enumerate()
                    .map(|(index, jack)| (JackKind::Out, index, self.jack_defects(jack))),
            )
            .filter(|(_, _, reasons)| !reasons.is_empty())
            .map(|(kind, index, reasons)| BadJack {
                kind,
                index,
                reasons,
            })
            .collect();

        let healthy = self.healthy_outputs().await;
        let unmet = self.unmet_requirements_with(&healthy).await;

        let unmet_requirements: Vec<String> = unmet.iter().map(|r| r.name().to_string()).collect();
        let valid = bad_jacks.is_empty() && unmet_requirements.is_empty();

        ValidationReport {
            patch: self.name.clone(),
            protocol: self.protocol,
            checked_at: Utc::now(),
            valid,
            bad_jacks,
            unmet_requirements,
            healthy_outputs: healthy.len(),
            total_outputs: self.outputs.len(),
        }
    }
}

/// Builder for [`Patch`]
pub struct PatchBuilder {
    patch: Patch,
}

impl PatchBuilder {
    /// Add an input jack
    pub fn input(mut self, jack: InJack) -> Self {
        self.patch.inputs.push(jack);
        self
    }

    /// Add an output jack
    pub fn output(mut self, jack: OutJack) -> Self {
        self.patch.outputs.push(jack);
        self
    }

    /// Add a requirement
    pub fn requirement(self, requirement: impl Requirement + 'static) -> Self {
        self.boxed_requirement(Box::new(requirement))
    }

    /// Add an already boxed requirement
    pub fn boxed_requirement(mut self, requirement: Box<dyn Requirement>) -> Self {
        self.patch.requirements.push(requirement);
        self
    }

    /// Finish the patch
    pub fn build(self) -> Patch {
        self.patch
    }
}

/// A jack rejected by its patch, with every reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadJack {
    /// Input or output
    pub kind: JackKind,
    /// Position within the patch's inputs or outputs
    pub index: usize,
    /// Why the jack was rejected
    pub reasons: Vec<JackDefect>,
}

/// Point-in-time validation result for a patch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Patch name
    pub patch: String,
    /// Patch protocol
    pub protocol: Protocol,
    /// When the snapshot was taken
    pub checked_at: DateTime<Utc>,
    /// No bad jacks and no unmet requirements
    pub valid: bool,
    /// Rejected jacks, inputs first
    pub bad_jacks: Vec<BadJack>,
    /// Names of unmet requirements, in declaration order
    pub unmet_requirements: Vec<String>,
    /// Healthy output count
    pub healthy_outputs: usize,
    /// Declared output count
    pub total_outputs: usize,
}
