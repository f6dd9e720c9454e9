//! Contract Test: Configuration Loading
//!
//! Constraints verified:
//! - A patch file on disk builds into an equivalent Patch
//! - Structurally bad jacks survive the build and are reported, not rejected
//! - Configuration errors (unreadable file, bad JSON, bad options) are errors
//!
//! If this test fails, configuration and validation disagree about what a
//! malformed jack is.

mod common;

use common::*;
use patchbay_core::{Error, JackDefect, JackKind, PatchConfig, RequirementRegistry};
use std::io::Write;

const CONFIG: &str = r#"{
    "name": "orders-db",
    "protocol": "mysql",
    "inputs": [
        { "host": "api1.internal", "port": 3306 },
        { "host": "api2.internal", "port": 3306, "protocol": "redis" }
    ],
    "outputs": [
        { "host": "db1.internal", "port": 3306, "returns": { "role": "primary" } },
        { "host": "db2.internal", "port": 3306, "returns": { "role": "replica" } },
        { "host": "db3..internal", "port": 3306 }
    ],
    "requirements": [
        { "kind": "replication", "options": { "number_of_replicants": 2 } }
    ]
}"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn file_config_builds_and_validates() {
    let file = write_config(CONFIG);
    let config = PatchConfig::from_file(file.path()).await.unwrap();

    let hosts = CountingHostProbe::new();
    hosts.set_alive("db1.internal", true).await;
    hosts.set_alive("db2.internal", true).await;

    let patch = config
        .build(&RequirementRegistry::with_builtin(), registry_with(&hosts))
        .unwrap();

    assert_eq!(patch.healthy_outputs().await.len(), 2);
    assert!(patch.unmet_requirements().await.is_empty());
    assert!(!patch.validate().await);

    let report = patch.report().await;
    assert_eq!(report.bad_jacks.len(), 2);
    assert_eq!(report.bad_jacks[0].kind, JackKind::In);
    assert_eq!(report.bad_jacks[0].index, 1);
    assert_eq!(report.bad_jacks[1].kind, JackKind::Out);
    assert_eq!(report.bad_jacks[1].index, 2);
    assert_eq!(report.bad_jacks[1].reasons, vec![JackDefect::MissingHost]);
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = PatchConfig::from_file(dir.path().join("absent.json")).await;
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn malformed_json_is_json_error() {
    let result = PatchConfig::from_json_str(r#"{ "name": "x", "protocol": "#);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn bad_requirement_option_fails_build() {
    let json = CONFIG.replace(
        r#""number_of_replicants": 2"#,
        r#""number_of_replicants": "two""#,
    );
    let config = PatchConfig::from_json_str(&json).unwrap();
    let hosts = CountingHostProbe::new();

    let result = config.build(&RequirementRegistry::with_builtin(), registry_with(&hosts));
    assert!(matches!(result, Err(Error::InvalidOption { .. })));
}

#[test]
fn built_patch_validates_from_blocking_context() {
    let config = PatchConfig::from_json_str(CONFIG).unwrap();
    let hosts = CountingHostProbe::new();
    let patch = config
        .build(&RequirementRegistry::with_builtin(), registry_with(&hosts))
        .unwrap();

    // Nothing is alive, so replication fails alongside the bad jacks
    let unmet = tokio_test::block_on(patch.unmet_requirements());
    assert_eq!(unmet.len(), 1);
    assert!(!tokio_test::block_on(patch.validate()));
}
