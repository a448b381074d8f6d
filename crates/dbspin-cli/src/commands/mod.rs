//! Subcommand implementations plus the flag/config/default resolution
//! they share.
//!
//! Precedence for every tunable: CLI flag > dbspin.toml > catalogue
//! default.

pub mod down;
pub mod probe;
pub mod up;

use std::path::Path;

use anyhow::{Context, Result};

use dbspin_core::{DbspinConfig, EngineKind, EngineSpec, parse_duration};
use dbspin_probe::ProbeConfig;

/// Load an explicit config file, or discover `./dbspin.toml`.
pub(crate) fn load_config(path: Option<&str>) -> Result<DbspinConfig> {
    match path {
        Some(p) => DbspinConfig::from_file(Path::new(p))
            .with_context(|| format!("failed to read config file {p}")),
        None => DbspinConfig::discover(),
    }
}

/// Resolve the engine spec from kind, config, and the port flag.
pub(crate) fn resolve_spec(
    kind: EngineKind,
    config: &DbspinConfig,
    port: Option<u16>,
) -> EngineSpec {
    let mut spec = EngineSpec::resolve(kind, config);
    if let Some(port) = port {
        spec.host_port = port;
    }
    spec
}

/// Resolve the probe budget and delay.
pub(crate) fn resolve_probe_config(
    config: &DbspinConfig,
    attempts: Option<u32>,
    delay: Option<&str>,
) -> Result<ProbeConfig> {
    let section = config.probe.as_ref();

    let max_attempts = attempts
        .or_else(|| section.and_then(|p| p.max_attempts))
        .unwrap_or(ProbeConfig::DEFAULT_MAX_ATTEMPTS);

    let delay_str = delay
        .map(str::to_string)
        .or_else(|| section.and_then(|p| p.delay.clone()));
    let delay = match delay_str {
        Some(s) => parse_duration(&s).with_context(|| format!("invalid delay duration '{s}'"))?,
        None => ProbeConfig::DEFAULT_DELAY,
    };

    Ok(ProbeConfig::new(max_attempts, delay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn probe_config_defaults_when_nothing_is_set() {
        let config = DbspinConfig::default();
        let probe = resolve_probe_config(&config, None, None).unwrap();
        assert_eq!(probe.max_attempts(), ProbeConfig::DEFAULT_MAX_ATTEMPTS);
        assert_eq!(probe.delay(), ProbeConfig::DEFAULT_DELAY);
    }

    #[test]
    fn probe_config_reads_config_file_section() {
        let config: DbspinConfig =
            toml::from_str("[probe]\nmax_attempts = 10\ndelay = \"500ms\"\n").unwrap();
        let probe = resolve_probe_config(&config, None, None).unwrap();
        assert_eq!(probe.max_attempts(), 10);
        assert_eq!(probe.delay(), Duration::from_millis(500));
    }

    #[test]
    fn cli_flags_beat_config_file() {
        let config: DbspinConfig =
            toml::from_str("[probe]\nmax_attempts = 10\ndelay = \"500ms\"\n").unwrap();
        let probe = resolve_probe_config(&config, Some(3), Some("0s")).unwrap();
        assert_eq!(probe.max_attempts(), 3);
        assert_eq!(probe.delay(), Duration::ZERO);
    }

    #[test]
    fn invalid_delay_flag_is_an_error() {
        let config = DbspinConfig::default();
        let err = resolve_probe_config(&config, None, Some("soon")).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn port_flag_beats_config_port() {
        let config: DbspinConfig = toml::from_str("[mariadb]\nport = 13306\n").unwrap();
        let spec = resolve_spec(EngineKind::MariaDb, &config, Some(23306));
        assert_eq!(spec.host_port, 23306);

        let spec = resolve_spec(EngineKind::MariaDb, &config, None);
        assert_eq!(spec.host_port, 13306);
    }
}
