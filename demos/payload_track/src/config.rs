//! TOML run configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use pt_core::{CarrierConfig, SimConfig};

/// Built-in configuration, used when no `--config` file is given.
const DEFAULT_CONFIG: &str = include_str!("../payload_track.toml");

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of carriers, all spawned at the start of the track.
    pub carriers: usize,
    pub sim:      SimConfig,
    pub carrier:  CarrierConfig,
    pub crowd:    CrowdConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            carriers: 1,
            sim:      SimConfig::default(),
            carrier:  CarrierConfig::default(),
            crowd:    CrowdConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CrowdConfig {
    /// Seconds at the start of the run during which every carrier is locked.
    pub setup_secs: f64,

    /// Probability that each of the three pushers is on the cart in a tick.
    pub pusher_probability: f64,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self { setup_secs: 0.0, pusher_probability: 0.5 }
    }
}

impl DemoConfig {
    /// Load `path`, or the built-in configuration when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let text = match path {
            Some(p) => std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?,
            None => DEFAULT_CONFIG.to_owned(),
        };
        let config: DemoConfig = toml::from_str(&text).context("parsing config")?;
        Ok(config)
    }
}
