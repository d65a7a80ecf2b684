use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use sheets_core::{UpstreamEndpoints, DEFAULT_UPSTREAM_ORIGIN};
use sheets_engine::{
    AssetSettings, FetchSettings, PipelineSettings, DEFAULT_STATIC_BASE, DEFAULT_UPSTREAM_TIMEOUT,
};

use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "sheets.ron";

/// Contents of `sheets.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub upstream_origin: String,
    pub static_base: String,
    pub timeout_secs: u64,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upstream_origin: DEFAULT_UPSTREAM_ORIGIN.to_string(),
            static_base: DEFAULT_STATIC_BASE.to_string(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT.as_secs(),
            max_bytes: FetchSettings::default().max_bytes,
            log_destination: LogDestination::default(),
            verbose: false,
        }
    }
}

impl AppConfig {
    pub fn pipeline_settings(&self) -> anyhow::Result<PipelineSettings> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be positive");
        }
        let endpoints = UpstreamEndpoints::new(&self.upstream_origin)
            .context("upstream_origin in configuration")?;
        Ok(PipelineSettings {
            endpoints,
            timeout: Duration::from_secs(self.timeout_secs),
            assets: AssetSettings::with_static_base(&self.static_base),
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }
}

/// Loads the configuration file. A missing file yields defaults silently; an
/// unreadable or malformed one yields defaults plus a warning to log once
/// logging is up.
pub fn load_config(path: &Path) -> (AppConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            let warning = format!("Failed to read configuration from {:?}: {}", path, err);
            return (AppConfig::default(), Some(warning));
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => {
            let warning = format!("Failed to parse configuration from {:?}: {}", path, err);
            (AppConfig::default(), Some(warning))
        }
    }
}
