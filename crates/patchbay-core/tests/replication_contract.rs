//! Contract Test: Replication Requirement
//!
//! Constraints verified:
//! - Satisfied iff number_of_replicants <= healthy output count
//! - Default number_of_replicants is 3
//! - Only healthy outputs count; inputs and unhealthy outputs never do
//! - Built through the registry, options behave the same as direct construction
//!
//! If this test fails, a degraded replica set can pass validation.

mod common;

use common::*;
use patchbay_core::requirement::Replication;
use patchbay_core::{
    InJack, OutJack, Patch, Protocol, Requirement, RequirementConfig, RequirementOptions,
    RequirementRegistry,
};

/// A mysql patch with `total` outputs of which the first `healthy` are up
async fn replica_set(hosts: &CountingHostProbe, total: usize, healthy: usize) -> Patch {
    let mut builder = Patch::builder("replicas", Protocol::Mysql, registry_with(hosts));
    for i in 0..total {
        let name = format!("db{}.internal", i);
        hosts.set_alive(&name, i < healthy).await;
        builder = builder.output(OutJack::parse(&name, 3306, "mysql"));
    }
    builder.build()
}

#[tokio::test]
async fn satisfied_iff_required_count_at_most_healthy_count() {
    for healthy in 0..=4 {
        let hosts = CountingHostProbe::new();
        let patch = replica_set(&hosts, 4, healthy).await;

        for required in 0..=5 {
            let replication = Replication::new(required);
            assert_eq!(
                replication.validate(&patch).await,
                required <= healthy,
                "required={} healthy={}",
                required,
                healthy
            );
        }
    }
}

#[tokio::test]
async fn defaults_to_three_replicants() {
    let registry = RequirementRegistry::with_builtin();
    let config = RequirementConfig {
        kind: "replication".to_string(),
        options: RequirementOptions::new(),
    };
    let requirement = registry.create(&config).unwrap();

    let hosts = CountingHostProbe::new();
    let two_up = replica_set(&hosts, 3, 2).await;
    assert!(!requirement.validate(&two_up).await);

    let hosts = CountingHostProbe::new();
    let three_up = replica_set(&hosts, 3, 3).await;
    assert!(requirement.validate(&three_up).await);
}

#[tokio::test]
async fn inputs_do_not_count_as_replicas() {
    let hosts = CountingHostProbe::new();
    hosts.set_alive("app1", true).await;
    hosts.set_alive("app2", true).await;
    hosts.set_alive("db1", true).await;

    let patch = Patch::builder("replicas", Protocol::Mysql, registry_with(&hosts))
        .input(InJack::parse("app1", 3306, "mysql"))
        .input(InJack::parse("app2", 3306, "mysql"))
        .output(OutJack::parse("db1", 3306, "mysql"))
        .requirement(Replication::new(2))
        .build();

    assert_eq!(patch.healthy_outputs().await.len(), 1);
    assert!(!patch.validate().await);
}

#[tokio::test]
async fn every_evaluation_probes_every_output() {
    let hosts = CountingHostProbe::new();
    let patch = replica_set(&hosts, 5, 5).await;

    let replication = Replication::new(3);
    assert!(replication.validate(&patch).await);
    assert_eq!(hosts.call_count(), 5);

    assert!(replication.validate(&patch).await);
    assert_eq!(hosts.call_count(), 10);
}

#[tokio::test]
async fn registry_options_match_direct_construction() {
    let registry = RequirementRegistry::with_builtin();
    let config: RequirementConfig =
        serde_json::from_str(r#"{ "kind": "replication", "options": { "number_of_replicants": 2 } }"#)
            .unwrap();
    let from_registry = registry.create(&config).unwrap();
    let direct = Replication::new(2);

    let hosts = CountingHostProbe::new();
    for healthy in 0..=3 {
        let patch = replica_set(&hosts, 3, healthy).await;
        assert_eq!(
            from_registry.validate(&patch).await,
            direct.validate(&patch).await
        );
    }
}

#[tokio::test]
async fn snapshot_evaluation_does_not_probe() {
    let hosts = CountingHostProbe::new();
    let patch = replica_set(&hosts, 3, 2).await;

    let snapshot = patch.healthy_outputs().await;
    assert_eq!(hosts.call_count(), 3);

    assert!(Replication::new(2).validate_with(&patch, &snapshot).await);
    assert!(!Replication::new(3).validate_with(&patch, &snapshot).await);
    assert_eq!(hosts.call_count(), 3);
}
