//! The engine catalogue.
//!
//! Everything engine-specific that the docker and db layers need (image,
//! container name, ports, credentials, environment) lives here as data,
//! so adding an engine means adding a catalogue entry, not new code paths.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::DbspinConfig;

/// Database engines dbspin knows how to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    MariaDb,
    Postgres,
}

/// Error for an unrecognised `--engine` value.
#[derive(Debug, Error)]
#[error("unknown engine '{0}' (expected 'mariadb' or 'postgres')")]
pub struct UnknownEngine(String);

impl FromStr for EngineKind {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mariadb" => Ok(EngineKind::MariaDb),
            "postgres" | "postgresql" => Ok(EngineKind::Postgres),
            other => Err(UnknownEngine(other.to_string())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::MariaDb => write!(f, "mariadb"),
            EngineKind::Postgres => write!(f, "postgres"),
        }
    }
}

/// A concrete, fully-resolved engine description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSpec {
    pub kind: EngineKind,
    /// Image reference passed to `docker pull` / `docker run`.
    pub image: String,
    /// Fixed container name; re-runs remove or reuse this container.
    pub container_name: String,
    /// Port the engine listens on inside the container.
    pub container_port: u16,
    /// Host port the container publishes.
    pub host_port: u16,
    /// Superuser account name.
    pub user: String,
    /// Superuser password, injected via the engine's environment variable.
    pub password: String,
    /// Name of the demonstration database.
    pub database: String,
}

impl EngineSpec {
    /// Catalogue defaults for an engine.
    pub fn defaults(kind: EngineKind) -> Self {
        match kind {
            EngineKind::MariaDb => EngineSpec {
                kind,
                image: "mariadb:latest".to_string(),
                container_name: "mariadb-test".to_string(),
                container_port: 3306,
                host_port: 3306,
                user: "root".to_string(),
                password: "sa".to_string(),
                database: "test".to_string(),
            },
            EngineKind::Postgres => EngineSpec {
                kind,
                image: "postgres:17".to_string(),
                container_name: "postgres-test".to_string(),
                container_port: 5432,
                host_port: 5432,
                user: "postgres".to_string(),
                password: "sa".to_string(),
                database: "test".to_string(),
            },
        }
    }

    /// Catalogue defaults with any `dbspin.toml` overrides applied.
    pub fn resolve(kind: EngineKind, config: &DbspinConfig) -> Self {
        let mut spec = Self::defaults(kind);
        let section = match kind {
            EngineKind::MariaDb => config.mariadb.as_ref(),
            EngineKind::Postgres => config.postgres.as_ref(),
        };
        if let Some(section) = section {
            if let Some(image) = &section.image {
                spec.image = image.clone();
            }
            if let Some(port) = section.port {
                spec.host_port = port;
            }
            if let Some(password) = &section.password {
                spec.password = password.clone();
            }
        }
        spec
    }

    /// Environment variables for `docker run -e`.
    pub fn env(&self) -> Vec<(String, String)> {
        match self.kind {
            EngineKind::MariaDb => {
                vec![("MARIADB_ROOT_PASSWORD".to_string(), self.password.clone())]
            }
            EngineKind::Postgres => {
                vec![("POSTGRES_PASSWORD".to_string(), self.password.clone())]
            }
        }
    }

    /// The `-p host:container` argument for `docker run`.
    pub fn port_mapping(&self) -> String {
        format!("{}:{}", self.host_port, self.container_port)
    }
}
