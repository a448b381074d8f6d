//! `dbspin probe`: the readiness wait on its own, against a service that
//! something else already started.

use anyhow::{Result, bail};

use dbspin_core::EngineKind;

use super::{load_config, resolve_probe_config, resolve_spec};

pub async fn probe(
    engine: &str,
    port: Option<u16>,
    attempts: Option<u32>,
    delay: Option<&str>,
    config_path: Option<&str>,
) -> Result<()> {
    let kind: EngineKind = engine.parse()?;
    let config = load_config(config_path)?;
    let spec = resolve_spec(kind, &config, port);
    let probe_config = resolve_probe_config(&config, attempts, delay)?;

    println!(
        "Probing {kind} on port {} ({} attempts, {:?} delay)...",
        spec.host_port,
        probe_config.max_attempts(),
        probe_config.delay()
    );

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

    println!("{kind} is ready (attempt {}/{max_attempts})", report.attempts);
    Ok(())
}
