//! dbspin core: the engine catalogue, `dbspin.toml` parsing, and small
//! shared helpers used by the docker, probe, and db crates.

mod config;
mod duration;
mod engine;

pub use config::{DbspinConfig, EngineSection, ProbeSection};
pub use duration::parse_duration;
pub use engine::{EngineKind, EngineSpec, UnknownEngine};
