//! `dbspin up`: the full provisioning flow.
//!
//! Pull, remove-or-reuse, run detached, readiness wait, demonstration
//! schema, print rows. If the readiness wait exhausts its budget, schema
//! setup is skipped and the command fails.

use anyhow::{Result, bail};
use tracing::info;

use dbspin_core::EngineKind;
use dbspin_docker::DockerCli;

use super::{load_config, resolve_probe_config, resolve_spec};

pub async fn up(
    engine: &str,
    port: Option<u16>,
    reuse: bool,
    attempts: Option<u32>,
    delay: Option<&str>,
    config_path: Option<&str>,
) -> Result<()> {
    let kind: EngineKind = engine.parse()?;
    let config = load_config(config_path)?;
    let spec = resolve_spec(kind, &config, port);
    let probe_config = resolve_probe_config(&config, attempts, delay)?;

    let docker = DockerCli::new()?;

    println!("Pulling {} image...", spec.image);
    docker.pull(&spec.image)?;

    if reuse && docker.is_running(&spec.container_name)? {
        info!(container = %spec.container_name, "reusing running container");
        println!("Reusing running container {}", spec.container_name);
    } else {
        println!("Starting {} container...", spec.container_name);
        if docker.remove_existing(&spec.container_name)? {
            println!("Removed existing container");
        }
        docker.run_detached(&spec)?;
    }

    println!("Waiting for {kind} to initialize...");
    let max_attempts = probe_config.max_attempts();
    let report = dbspin_probe::wait_ready(&probe_config, |attempt| {
        let spec = spec.clone();
        async move {
            if let Err(e) = dbspin_db::dial(&spec).await {
                println!("Attempt {attempt}/{max_attempts}: {} not ready yet... ({e})", spec.kind);
                return Err(e.into());
            }
            Ok(())
        }
    })
    .await;

    if !report.ready {
        bail!("{kind} failed to become ready within {} attempts", report.attempts);
    }

    println!("Connecting to {kind} and running the demonstration...");
    let rows = dbspin_db::run_demo(&spec).await?;

    println!("Query results:");
    println!("{}", dbspin_db::render_rows(&rows));

    println!();
    println!("Done. To stop and remove the container, run:");
    println!("  dbspin down --engine {kind}");

    Ok(())
}
