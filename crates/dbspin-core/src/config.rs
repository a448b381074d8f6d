//! dbspin.toml configuration parser.
//!
//! The config file is optional; every field has a catalogue default.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbspinConfig {
    pub probe: Option<ProbeSection>,
    pub mariadb: Option<EngineSection>,
    pub postgres: Option<EngineSection>,
}

/// `[probe]`: readiness wait tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSection {
    pub max_attempts: Option<u32>,
    /// Fixed delay between attempts, as a duration string ("2s", "500ms").
    pub delay: Option<String>,
}

/// `[mariadb]` / `[postgres]`: per-engine overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    pub image: Option<String>,
    pub port: Option<u16>,
    pub password: Option<String>,
}

impl DbspinConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DbspinConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `dbspin.toml` from the current directory if present, otherwise
    /// fall back to defaults.
    pub fn discover() -> anyhow::Result<Self> {
        let path = Path::new("dbspin.toml");
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_file_is_all_defaults() {
        let config: DbspinConfig = toml::from_str("").unwrap();
        assert!(config.probe.is_none());
        assert!(config.mariadb.is_none());
        assert!(config.postgres.is_none());
    }

    #[test]
    fn parse_partial_probe_section() {
        let config: DbspinConfig = toml::from_str("[probe]\nmax_attempts = 5\n").unwrap();
        let probe = config.probe.unwrap();
        assert_eq!(probe.max_attempts, Some(5));
        assert_eq!(probe.delay, None);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[probe]
max_attempts = 10
delay = "500ms"

[postgres]
image = "postgres:16"
port = 15432
"#;
        let config: DbspinConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.probe.unwrap().delay.as_deref(), Some("500ms"));
        assert_eq!(config.postgres.unwrap().port, Some(15432));
    }

    #[test]
    fn from_file_missing_is_an_error() {
        let result = DbspinConfig::from_file(Path::new("/nonexistent/dbspin.toml"));
        assert!(result.is_err());
    }
}
