//! `dbspin down`: stop and remove the engine's container.
//!
//! A container that does not exist is a no-op, so `down` is always safe to
//! run.

use anyhow::Result;

use dbspin_core::{EngineKind, EngineSpec};
use dbspin_docker::DockerCli;

use super::load_config;

pub fn down(engine: &str, config_path: Option<&str>) -> Result<()> {
    let kind: EngineKind = engine.parse()?;
    let config = load_config(config_path)?;
    let spec = EngineSpec::resolve(kind, &config);

    let docker = DockerCli::new()?;

    docker.stop(&spec.container_name)?;
    if docker.remove_existing(&spec.container_name)? {
        println!("Stopped and removed {}", spec.container_name);
    } else {
        println!("No {} container to remove", spec.container_name);
    }

    Ok(())
}
