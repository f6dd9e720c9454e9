//! Minimal embedding example for patchbay-core
//!
//! Builds a patch from JSON, feeds host liveness from the application, and
//! prints validation reports as liveness changes. Also shows how to plug in a
//! custom requirement kind and a per-protocol endpoint requirement.

use anyhow::Result;
use patchbay_core::probe::{DefaultProtocolProbe, MemoryHostProbe};
use patchbay_core::{
    EndpointRequirement, Host, Patch, PatchConfig, Port, Protocol, ProtocolRegistry, Requirement,
    RequirementFactory, RequirementOptions, RequirementRegistry,
};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

const PATCH: &str = r#"{
    "name": "orders-db",
    "protocol": "mysql",
    "inputs": [
        { "host": "api1.internal", "port": 3306 },
        { "host": "api2.internal", "port": 3306 }
    ],
    "outputs": [
        { "host": "db1.internal", "port": 3306, "returns": { "role": "primary" } },
        { "host": "db2.internal", "port": 3306, "returns": { "role": "replica" } },
        { "host": "db3.internal", "port": 3306, "returns": { "role": "replica" } }
    ],
    "requirements": [
        { "kind": "replication", "options": { "number_of_replicants": 2 } },
        { "kind": "max_inputs", "options": { "limit": 4 } }
    ]
}"#;

/// Caps how many inputs may be wired into a patch
struct MaxInputs {
    limit: usize,
}

#[async_trait::async_trait]
impl Requirement for MaxInputs {
    fn name(&self) -> &str {
        "max_inputs"
    }

    async fn validate(&self, patch: &Patch) -> bool {
        patch.inputs().len() <= self.limit
    }
}

struct MaxInputsFactory;

impl RequirementFactory for MaxInputsFactory {
    fn create(&self, options: &RequirementOptions) -> patchbay_core::Result<Box<dyn Requirement>> {
        let limit = options.get_u64("max_inputs", "limit")?.unwrap_or(8);
        Ok(Box::new(MaxInputs {
            limit: usize::try_from(limit).unwrap_or(usize::MAX),
        }))
    }
}

/// MySQL endpoints must listen on the standard port
struct StandardMysqlPort;

#[async_trait::async_trait]
impl EndpointRequirement for StandardMysqlPort {
    fn name(&self) -> &str {
        "standard_mysql_port"
    }

    async fn check(&self, _host: &Host, port: Port) -> bool {
        port.get() == 3306
    }
}

fn init_tracing() -> Result<()> {
    let log_level = match env::var("PATCHBAY_LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn print_report(patch: &Patch) -> Result<()> {
    let report = patch.report().await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    // Liveness fed by the application (service discovery, monitoring, ...)
    let hosts = MemoryHostProbe::new();

    let host_probe = Arc::new(hosts.clone());
    let probes = ProtocolRegistry::new().with_default_probe(Arc::new(
        DefaultProtocolProbe::new(host_probe.clone()).with_timeout(Duration::from_secs(2)),
    ));
    probes.register_probe(
        Protocol::Mysql,
        Arc::new(
            DefaultProtocolProbe::new(host_probe)
                .with_requirement(Arc::new(StandardMysqlPort))
                .with_timeout(Duration::from_secs(2)),
        ),
    );

    let requirements = RequirementRegistry::with_builtin();
    requirements.register("max_inputs", Box::new(MaxInputsFactory));

    let patch = PatchConfig::from_json_str(PATCH)?.build(&requirements, Arc::new(probes))?;

    info!("Nothing reported alive yet");
    print_report(&patch).await?;

    for name in ["db1.internal", "db2.internal"] {
        hosts.set_alive(Host::parse(name)?, true).await;
    }
    info!("Two replicas up");
    print_report(&patch).await?;

    hosts.set_alive(Host::parse("db2.internal")?, false).await;
    info!("Replica db2 went down");
    print_report(&patch).await?;

    Ok(())
}
