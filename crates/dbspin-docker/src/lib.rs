//! Docker boundary for dbspin.
//!
//! Everything container-shaped happens through the `docker` CLI binary:
//! pull the image, force-remove any stale container, run a fresh detached
//! one with the engine's environment and port mapping, and tear it down
//! again. There is no daemon API client; the binary is the interface.
//!
//! Binary resolution order:
//! 1. `$DBSPIN_DOCKER_PATH` environment variable
//! 2. `docker` on `$PATH`

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

use dbspin_core::EngineSpec;

/// Errors from the docker boundary.
#[derive(Debug, Error)]
pub enum DockerError {
    #[error(
        "docker binary not found.\n\
         \n\
         Install Docker from https://docs.docker.com/get-docker/\n\
         or set DBSPIN_DOCKER_PATH to point to your docker binary."
    )]
    BinaryNotFound,

    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed (exit code {code}):\n{stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
}

pub type DockerResult<T> = Result<T, DockerError>;

/// A resolved docker binary plus the container operations dbspin needs.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
}

impl DockerCli {
    /// Resolve the docker binary and return a client.
    pub fn new() -> DockerResult<Self> {
        Ok(Self {
            binary: find_docker()?,
        })
    }

    /// Use a specific binary (tests point this at a stub script).
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// `docker pull <image>`.
    pub fn pull(&self, image: &str) -> DockerResult<()> {
        info!(image, "pulling image");
        self.run(&["pull", image])?;
        Ok(())
    }

    /// `docker rm -f <name>`, treating "no such container" as a no-op.
    ///
    /// Returns `true` if a container was actually removed.
    pub fn remove_existing(&self, name: &str) -> DockerResult<bool> {
        match self.run(&["rm", "-f", name]) {
            Ok(_) => Ok(true),
            Err(DockerError::CommandFailed { stderr, .. })
                if stderr.contains("No such container") =>
            {
                debug!(name, "no existing container to remove");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// `docker run -d --name <name> -e K=V... -p host:container <image>`.
    ///
    /// Returns the new container id.
    pub fn run_detached(&self, spec: &EngineSpec) -> DockerResult<String> {
        let mut args: Vec<String> = vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            spec.container_name.clone(),
        ];
        for (key, value) in spec.env() {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        args.push("-p".to_string());
        args.push(spec.port_mapping());
        args.push(spec.image.clone());

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let stdout = self.run(&arg_refs)?;
        let id = stdout.trim().to_string();
        info!(name = %spec.container_name, id = %id, "container started");
        Ok(id)
    }

    /// Whether a container with exactly this name is currently running.
    pub fn is_running(&self, name: &str) -> DockerResult<bool> {
        let filter = format!("name=^{name}$");
        let stdout = self.run(&["ps", "--filter", &filter, "--format", "{{.ID}}"])?;
        Ok(!stdout.trim().is_empty())
    }

    /// `docker stop <name>`, treating "no such container" as a no-op.
    pub fn stop(&self, name: &str) -> DockerResult<bool> {
        match self.run(&["stop", name]) {
            Ok(_) => Ok(true),
            Err(DockerError::CommandFailed { stderr, .. })
                if stderr.contains("No such container") =>
            {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Run one docker invocation, returning stdout on success.
    fn run(&self, args: &[&str]) -> DockerResult<String> {
        let command = format!("docker {}", args.join(" "));
        debug!(%command, binary = %self.binary.display(), "running");

        let output = Command::new(&self.binary).args(args).output().map_err(|e| {
            DockerError::Spawn {
                command: command.clone(),
                source: e,
            }
        })?;

        if !output.status.success() {
            return Err(DockerError::CommandFailed {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Locate the docker binary.
fn find_docker() -> DockerResult<PathBuf> {
    if let Ok(path) = std::env::var("DBSPIN_DOCKER_PATH") {
        let docker = PathBuf::from(&path);
        if docker.is_file() {
            debug!("found docker at {} (from DBSPIN_DOCKER_PATH)", docker.display());
            return Ok(docker);
        }
    }

    if let Ok(output) = Command::new("which").arg("docker").output() {
        if output.status.success() {
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path.is_empty() {
                debug!("found docker at {path} (system PATH)");
                return Ok(PathBuf::from(path));
            }
        }
    }

    Err(DockerError::BinaryNotFound)
}
